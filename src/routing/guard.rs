// ============================================================================
// ROUTE GUARD - Autorización de rutas por rol
// ============================================================================
// Una única tabla de acceso por tipo de ruta. El estado del autorizador se
// deriva de la sesión en cada navegación y en cada cambio de sesión.
// ============================================================================

use crate::models::Role;
use crate::routing::route::{Route, RouteKind};

/// Regla de acceso de una ruta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Solo sin sesión (login, registro)
    PublicOnly,
    /// Siempre accesible
    Open,
    /// Roles permitidos
    Roles(&'static [Role]),
    /// Cliente con establecimiento seleccionado
    Storefront,
}

const ADMINS: &[Role] = &[Role::Admin, Role::SuperAdmin];
const CLIENTES: &[Role] = &[Role::Cliente];

pub const ACCESS_TABLE: &[(RouteKind, Access)] = &[
    (RouteKind::Login, Access::PublicOnly),
    (RouteKind::Register, Access::PublicOnly),
    (RouteKind::EstablishmentSelection, Access::Roles(CLIENTES)),
    (RouteKind::Home, Access::Storefront),
    (RouteKind::Entradas, Access::Storefront),
    (RouteKind::Productos, Access::Storefront),
    (RouteKind::DetalleEntrada, Access::Storefront),
    (RouteKind::DetalleProducto, Access::Storefront),
    (RouteKind::Carrito, Access::Storefront),
    (RouteKind::Tickets, Access::Storefront),
    (RouteKind::Perfil, Access::Storefront),
    (RouteKind::Dashboard, Access::Roles(ADMINS)),
    (RouteKind::Preview, Access::Roles(ADMINS)),
    (RouteKind::NotFound, Access::Open),
];

impl Access {
    /// Rutas fuera de la tabla se tratan como restringidas a admins
    pub fn for_route(kind: RouteKind) -> Access {
        ACCESS_TABLE
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, access)| *access)
            .unwrap_or(Access::Roles(ADMINS))
    }

    fn allows(&self, role: Role, has_establishment: bool) -> bool {
        match self {
            Access::PublicOnly => false,
            Access::Open => true,
            Access::Roles(roles) => roles.contains(&role),
            Access::Storefront => role == Role::Cliente && has_establishment,
        }
    }
}

/// Lo que el autorizador necesita saber de la sesión
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AccessContext {
    pub has_token: bool,
    pub role: Option<Role>,
    pub has_establishment: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizerState {
    /// Hay token pero el rol aún no se ha resuelto
    Unresolved,
    /// Sin token
    Public,
    RoleChecked(Role),
}

impl AuthorizerState {
    pub fn from_context(ctx: &AccessContext) -> Self {
        match (ctx.has_token, ctx.role) {
            (false, _) => AuthorizerState::Public,
            (true, None) => AuthorizerState::Unresolved,
            (true, Some(role)) => AuthorizerState::RoleChecked(role),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
    /// Pintar el indicador de carga hasta que se resuelva el rol
    Suspend,
}

/// Ruta de aterrizaje por rol
pub fn landing_route(role: Role, has_establishment: bool) -> Route {
    match role {
        Role::Admin | Role::SuperAdmin => Route::Dashboard,
        Role::Cliente if has_establishment => Route::Home,
        Role::Cliente => Route::EstablishmentSelection,
    }
}

/// Decide qué hacer con la ruta pedida
pub fn authorize(route: &Route, ctx: &AccessContext) -> RouteDecision {
    let access = Access::for_route(route.kind());

    match AuthorizerState::from_context(ctx) {
        AuthorizerState::Unresolved => match access {
            Access::Open => RouteDecision::Render(route.clone()),
            _ => RouteDecision::Suspend,
        },
        AuthorizerState::Public => match access {
            Access::PublicOnly | Access::Open => RouteDecision::Render(route.clone()),
            _ => RouteDecision::Redirect(Route::Login),
        },
        AuthorizerState::RoleChecked(role) => {
            if access.allows(role, ctx.has_establishment) {
                RouteDecision::Render(route.clone())
            } else {
                RouteDecision::Redirect(landing_route(role, ctx.has_establishment))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::PreviewSection;

    const TODAS: [Route; 14] = [
        Route::Login,
        Route::Register,
        Route::EstablishmentSelection,
        Route::Home,
        Route::Entradas,
        Route::Productos,
        Route::DetalleEntrada(1),
        Route::DetalleProducto(1),
        Route::Carrito,
        Route::Tickets,
        Route::Perfil,
        Route::Dashboard,
        Route::Preview { establecimiento_id: 1, section: PreviewSection::Inicio },
        Route::NotFound,
    ];

    fn ctx(role: Option<Role>, has_establishment: bool) -> AccessContext {
        AccessContext { has_token: true, role, has_establishment }
    }

    #[test]
    fn test_tabla_cubre_todas_las_rutas() {
        for ruta in TODAS.iter() {
            assert!(
                ACCESS_TABLE.iter().any(|(k, _)| *k == ruta.kind()),
                "falta {:?} en la tabla",
                ruta.kind()
            );
        }
    }

    #[test]
    fn test_rol_incorrecto_nunca_renderiza() {
        for role in [Role::Cliente, Role::Admin, Role::SuperAdmin] {
            for has_est in [false, true] {
                let contexto = ctx(Some(role), has_est);
                for ruta in TODAS.iter() {
                    if let Access::Roles(roles) = Access::for_route(ruta.kind()) {
                        if !roles.contains(&role) {
                            assert!(
                                matches!(authorize(ruta, &contexto), RouteDecision::Redirect(_)),
                                "{:?} no debería ver {}",
                                role,
                                ruta
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_storefront_sin_establecimiento_va_al_selector() {
        let contexto = ctx(Some(Role::Cliente), false);
        for ruta in TODAS.iter() {
            if Access::for_route(ruta.kind()) == Access::Storefront {
                assert_eq!(
                    authorize(ruta, &contexto),
                    RouteDecision::Redirect(Route::EstablishmentSelection)
                );
            }
        }
    }

    #[test]
    fn test_sin_resolver_suspende() {
        let contexto = ctx(None, true);
        assert_eq!(authorize(&Route::Dashboard, &contexto), RouteDecision::Suspend);
        assert_eq!(authorize(&Route::Home, &contexto), RouteDecision::Suspend);
        assert_eq!(authorize(&Route::Login, &contexto), RouteDecision::Suspend);
        assert_eq!(
            authorize(&Route::NotFound, &contexto),
            RouteDecision::Render(Route::NotFound)
        );
    }

    #[test]
    fn test_publico_solo_login_y_registro() {
        let contexto = AccessContext::default();
        assert_eq!(authorize(&Route::Login, &contexto), RouteDecision::Render(Route::Login));
        assert_eq!(authorize(&Route::Register, &contexto), RouteDecision::Render(Route::Register));
        assert_eq!(authorize(&Route::Carrito, &contexto), RouteDecision::Redirect(Route::Login));
        assert_eq!(authorize(&Route::Dashboard, &contexto), RouteDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_login_con_sesion_redirige_al_aterrizaje() {
        assert_eq!(
            authorize(&Route::Login, &ctx(Some(Role::Admin), false)),
            RouteDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            authorize(&Route::Register, &ctx(Some(Role::Cliente), true)),
            RouteDecision::Redirect(Route::Home)
        );
        assert_eq!(
            authorize(&Route::Login, &ctx(Some(Role::Cliente), false)),
            RouteDecision::Redirect(Route::EstablishmentSelection)
        );
    }

    #[test]
    fn test_aterrizaje_siempre_autorizado() {
        for role in [Role::Cliente, Role::Admin, Role::SuperAdmin] {
            for has_est in [false, true] {
                let destino = landing_route(role, has_est);
                assert_eq!(
                    authorize(&destino, &ctx(Some(role), has_est)),
                    RouteDecision::Render(destino.clone())
                );
            }
        }
    }

    #[test]
    fn test_preview_para_admins() {
        let ruta = Route::Preview { establecimiento_id: 3, section: PreviewSection::Productos };
        assert_eq!(
            authorize(&ruta, &ctx(Some(Role::SuperAdmin), false)),
            RouteDecision::Render(ruta.clone())
        );
        assert_eq!(
            authorize(&ruta, &ctx(Some(Role::Cliente), true)),
            RouteDecision::Redirect(Route::Home)
        );
    }
}
