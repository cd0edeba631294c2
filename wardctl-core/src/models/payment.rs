//! Payment cards kept on a patient's in-memory profile (never persisted).

use chrono::{Local, NaiveDate};

use super::validation::non_empty;
use super::ValidationError;

#[derive(Clone, PartialEq)]
pub struct Card {
    card_holder: String,
    card_number: String,
    expiration_date: NaiveDate,
    cvv: String,
}

impl Card {
    /// Validate against today's local date.
    pub fn new(
        card_holder: &str,
        card_number: &str,
        expiration_date: NaiveDate,
        cvv: &str,
    ) -> Result<Self, ValidationError> {
        Self::new_as_of(
            card_holder,
            card_number,
            expiration_date,
            cvv,
            Local::now().date_naive(),
        )
    }

    pub fn new_as_of(
        card_holder: &str,
        card_number: &str,
        expiration_date: NaiveDate,
        cvv: &str,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let card_holder = non_empty("card holder", card_holder)?;
        let card_number = digits("card number", card_number, 15, 16)?;
        let cvv = digits("cvv", cvv, 3, 4)?;

        if expiration_date <= today {
            return Err(ValidationError::CardExpired {
                expired: expiration_date,
            });
        }

        Ok(Self {
            card_holder,
            card_number,
            expiration_date,
            cvv,
        })
    }

    pub fn card_holder(&self) -> &str {
        &self.card_holder
    }

    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Last four digits, everything else masked.
    pub fn masked_number(&self) -> String {
        let visible = &self.card_number[self.card_number.len() - 4..];
        format!("{}{}", "*".repeat(self.card_number.len() - 4), visible)
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("card_holder", &self.card_holder)
            .field("card_number", &self.masked_number())
            .field("expiration_date", &self.expiration_date)
            .finish_non_exhaustive()
    }
}

fn digits(
    field: &'static str,
    value: &str,
    min_len: usize,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "digits only",
        });
    }

    let len = value.len();
    if len < min_len || len > max_len {
        return Err(ValidationError::OutOfRange {
            field,
            min: min_len as i64,
            max: max_len as i64,
            value: len as i64,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn next_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
    }

    #[test]
    fn accepts_valid_card() {
        let card = Card::new_as_of("A B", "4111 1111 1111 1111", next_year(), "123", today()).unwrap();
        assert_eq!(card.masked_number(), "************1111");
        assert!(!format!("{card:?}").contains("4111"));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            Card::new_as_of("A B", "4111", next_year(), "123", today()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Card::new_as_of("A B", "4111-1111-1111-1111", next_year(), "123", today()),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Card::new_as_of("A B", "411111111111111", next_year(), "12", today()).is_err());
    }

    #[test]
    fn rejects_expired_card() {
        let err = Card::new_as_of("A B", "411111111111111", today(), "1234", today()).unwrap_err();
        assert!(matches!(err, ValidationError::CardExpired { .. }));
    }
}
