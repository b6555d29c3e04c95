use chrono::NaiveDate;

/// Fixed part of every downloaded QR file name.
pub const DOWNLOAD_LABEL: &str = "Magma link";

/// Used in the file name when no source was typed.
pub const FALLBACK_SOURCE: &str = "unknown";

/// `{YYYY-MM-DD}-Magma link-{source}.png`, with [`FALLBACK_SOURCE`] for an empty source.
///
/// The source is used verbatim; only an empty string falls back.
pub fn qr_file_name(date: NaiveDate, source: &str) -> String {
    let source = if source.is_empty() {
        FALLBACK_SOURCE
    } else {
        source
    };
    format!("{}-{DOWNLOAD_LABEL}-{source}.png", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn uses_source_label() {
        assert_eq!(
            qr_file_name(june_first(), "newsletter-juin"),
            "2024-06-01-Magma link-newsletter-juin.png"
        );
    }

    #[test]
    fn falls_back_for_empty_source() {
        assert_eq!(
            qr_file_name(june_first(), ""),
            "2024-06-01-Magma link-unknown.png"
        );
    }

    #[test]
    fn pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(987, 1, 9).unwrap();
        assert_eq!(qr_file_name(date, "x"), "0987-01-09-Magma link-x.png");
    }
}
