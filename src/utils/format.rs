use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

const MESES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

/// "12.50 €"
pub fn format_price(amount: f64) -> String {
    format!("{:.2} €", amount)
}

/// "1 de junio de 2025"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MESES[date.month0() as usize],
        date.year()
    )
}

/// "15 de mayo de 2025, 14:30"
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_date(datetime.date_naive()),
        datetime.hour(),
        datetime.minute()
    )
}

/// Inicial del usuario para el avatar del navbar
pub fn initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.0), "12.00 €");
        assert_eq!(format_price(14.52), "14.52 €");
    }

    #[test]
    fn test_format_datetime() {
        let fecha = Utc.with_ymd_and_hms(2025, 5, 15, 14, 30, 0).unwrap();
        assert_eq!(format_datetime(&fecha), "15 de mayo de 2025, 14:30");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("ana"), "A");
        assert_eq!(initial(""), "U");
    }
}
