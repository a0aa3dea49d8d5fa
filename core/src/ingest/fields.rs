use crate::prelude::{check_range, RowParseError, RowResult};
use csv::StringRecord;

/// Trimmed, non-empty field at `index`.
pub(crate) fn required<'r>(
    row: &'r StringRecord,
    index: Option<usize>,
    name: &'static str,
) -> RowResult<&'r str> {
    optional(row, index).ok_or(RowParseError::MissingField(name))
}

pub(crate) fn optional(row: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

pub(crate) fn float(name: &'static str, text: &str) -> RowResult<f64> {
    text.parse::<f64>()
        .map_err(|_| RowParseError::InvalidNumber {
            field: name,
            value: text.to_string(),
        })
}

pub(crate) fn latitude(text: &str) -> RowResult<f64> {
    check_range("latitude", float("latitude", text)?, 90.0)
}

pub(crate) fn longitude(text: &str) -> RowResult<f64> {
    check_range("longitude", float("longitude", text)?, 180.0)
}

/// Accepts integer text and integral float text such as `"7.0"`.
pub(crate) fn integer<T: TryFrom<i64>>(name: &'static str, text: &str) -> RowResult<T> {
    let whole = match text.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            let value = float(name, text)?;
            if !value.is_finite() || value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
                return Err(RowParseError::InvalidNumber {
                    field: name,
                    value: text.to_string(),
                });
            }
            value as i64
        }
    };
    T::try_from(whole).map_err(|_| RowParseError::OutOfRange {
        field: name,
        value: whole as f64,
    })
}

/// Float altitude truncated toward zero; absent text means no altitude.
pub(crate) fn altitude(text: Option<&str>) -> RowResult<Option<i32>> {
    let Some(text) = text else {
        return Ok(None);
    };
    let value = float("altitude", text)?;
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX)
    {
        return Err(RowParseError::OutOfRange {
            field: "altitude",
            value,
        });
    }
    Ok(Some(truncated as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_integral_floats() {
        assert_eq!(integer::<i64>("cell_id", "7"), Ok(7));
        assert_eq!(integer::<i64>("cell_id", "7.0"), Ok(7));
        assert_eq!(integer::<i32>("signal", "-95"), Ok(-95));
    }

    #[test]
    fn integer_rejects_fractions_and_garbage() {
        assert!(integer::<i64>("cell_id", "7.5").is_err());
        assert!(integer::<i64>("cell_id", "abc").is_err());
        assert!(integer::<i64>("cell_id", "inf").is_err());
        assert!(matches!(
            integer::<i32>("signal", "5000000000"),
            Err(RowParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn altitude_truncates_toward_zero() {
        assert_eq!(altitude(Some("312.9")), Ok(Some(312)));
        assert_eq!(altitude(Some("-4.7")), Ok(Some(-4)));
        assert_eq!(altitude(None), Ok(None));
        assert!(altitude(Some("high")).is_err());
    }

    #[test]
    fn required_treats_blank_as_missing() {
        let row = StringRecord::from(vec!["43.0", "  "]);
        assert_eq!(required(&row, Some(0), "lat"), Ok("43.0"));
        assert_eq!(
            required(&row, Some(1), "lon"),
            Err(RowParseError::MissingField("lon"))
        );
        assert_eq!(
            required(&row, None, "rssi"),
            Err(RowParseError::MissingField("rssi"))
        );
    }
}
