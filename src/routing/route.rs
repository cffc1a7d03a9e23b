// ============================================================================
// ROUTE - Superficie de rutas del cliente (History API, sin rutas de servidor)
// ============================================================================

use std::fmt;

/// Sección del storefront en modo preview
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewSection {
    Inicio,
    Entradas,
    Productos,
    Tickets,
    Carrito,
}

impl PreviewSection {
    fn suffix(&self) -> &'static str {
        match self {
            PreviewSection::Inicio => "",
            PreviewSection::Entradas => "/entradas",
            PreviewSection::Productos => "/productos",
            PreviewSection::Tickets => "/tickets",
            PreviewSection::Carrito => "/carrito",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    EstablishmentSelection,
    Home,
    Entradas,
    Productos,
    DetalleEntrada(i64),
    DetalleProducto(i64),
    Carrito,
    Tickets,
    Perfil,
    Dashboard,
    Preview { establecimiento_id: i64, section: PreviewSection },
    NotFound,
}

/// Ruta sin parámetros: clave de la tabla de acceso
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Login,
    Register,
    EstablishmentSelection,
    Home,
    Entradas,
    Productos,
    DetalleEntrada,
    DetalleProducto,
    Carrito,
    Tickets,
    Perfil,
    Dashboard,
    Preview,
    NotFound,
}

impl Route {
    /// Parsea un pathname. Query string y barra final se ignoran.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["registro"] => Route::Register,
            ["establecimiento"] => Route::EstablishmentSelection,
            ["home"] => Route::Home,
            ["entradas"] => Route::Entradas,
            ["productos"] => Route::Productos,
            ["carrito"] => Route::Carrito,
            ["tickets"] => Route::Tickets,
            ["perfil"] => Route::Perfil,
            ["dashboard"] => Route::Dashboard,
            ["notFound"] => Route::NotFound,
            ["detalle-entrada", id] => parse_id(id).map_or(Route::NotFound, Route::DetalleEntrada),
            ["detalle-producto", id] => parse_id(id).map_or(Route::NotFound, Route::DetalleProducto),
            ["preview", id, rest @ ..] => {
                let section = match rest {
                    [] => Some(PreviewSection::Inicio),
                    ["entradas"] => Some(PreviewSection::Entradas),
                    ["productos"] => Some(PreviewSection::Productos),
                    ["tickets"] => Some(PreviewSection::Tickets),
                    ["carrito"] => Some(PreviewSection::Carrito),
                    _ => None,
                };
                match (parse_id(id), section) {
                    (Some(establecimiento_id), Some(section)) => Route::Preview { establecimiento_id, section },
                    _ => Route::NotFound,
                }
            }
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Register => "/registro".to_string(),
            Route::EstablishmentSelection => "/establecimiento".to_string(),
            Route::Home => "/home".to_string(),
            Route::Entradas => "/entradas".to_string(),
            Route::Productos => "/productos".to_string(),
            Route::DetalleEntrada(id) => format!("/detalle-entrada/{}", id),
            Route::DetalleProducto(id) => format!("/detalle-producto/{}", id),
            Route::Carrito => "/carrito".to_string(),
            Route::Tickets => "/tickets".to_string(),
            Route::Perfil => "/perfil".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Preview { establecimiento_id, section } => {
                format!("/preview/{}{}", establecimiento_id, section.suffix())
            }
            Route::NotFound => "/notFound".to_string(),
        }
    }

    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Login => RouteKind::Login,
            Route::Register => RouteKind::Register,
            Route::EstablishmentSelection => RouteKind::EstablishmentSelection,
            Route::Home => RouteKind::Home,
            Route::Entradas => RouteKind::Entradas,
            Route::Productos => RouteKind::Productos,
            Route::DetalleEntrada(_) => RouteKind::DetalleEntrada,
            Route::DetalleProducto(_) => RouteKind::DetalleProducto,
            Route::Carrito => RouteKind::Carrito,
            Route::Tickets => RouteKind::Tickets,
            Route::Perfil => RouteKind::Perfil,
            Route::Dashboard => RouteKind::Dashboard,
            Route::Preview { .. } => RouteKind::Preview,
            Route::NotFound => RouteKind::NotFound,
        }
    }

    /// Login, registro y selector de establecimiento se pintan sin navbar ni footer
    pub fn has_chrome(&self) -> bool {
        !matches!(
            self,
            Route::Login | Route::Register | Route::EstablishmentSelection | Route::Dashboard
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rutas_basicas() {
        assert_eq!(Route::parse("/"), Route::Login);
        assert_eq!(Route::parse(""), Route::Login);
        assert_eq!(Route::parse("/registro"), Route::Register);
        assert_eq!(Route::parse("/home/"), Route::Home);
        assert_eq!(Route::parse("/carrito?x=1"), Route::Carrito);
        assert_eq!(Route::parse("/no-existe"), Route::NotFound);
    }

    #[test]
    fn test_parse_detalle() {
        assert_eq!(Route::parse("/detalle-producto/12"), Route::DetalleProducto(12));
        assert_eq!(Route::parse("/detalle-entrada/3"), Route::DetalleEntrada(3));
        assert_eq!(Route::parse("/detalle-entrada/abc"), Route::NotFound);
    }

    #[test]
    fn test_parse_preview() {
        assert_eq!(
            Route::parse("/preview/5"),
            Route::Preview { establecimiento_id: 5, section: PreviewSection::Inicio }
        );
        assert_eq!(
            Route::parse("/preview/5/carrito"),
            Route::Preview { establecimiento_id: 5, section: PreviewSection::Carrito }
        );
        assert_eq!(Route::parse("/preview/5/dashboard"), Route::NotFound);
    }

    #[test]
    fn test_path_ida_y_vuelta() {
        let rutas = [
            Route::Login,
            Route::EstablishmentSelection,
            Route::DetalleProducto(8),
            Route::Preview { establecimiento_id: 2, section: PreviewSection::Tickets },
            Route::Dashboard,
        ];
        for ruta in rutas {
            assert_eq!(Route::parse(&ruta.path()), ruta);
        }
    }
}
