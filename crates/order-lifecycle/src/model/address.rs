use std::fmt;

/// Where an order is shipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub recipient: String,
    pub line1: String,
    pub line2: String,
    pub district: String,
    pub city: String,
    pub postcode: String,
}

impl Address {
    pub fn new(
        recipient: impl Into<String>,
        line1: impl Into<String>,
        line2: impl Into<String>,
        district: impl Into<String>,
        city: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            line1: line1.into(),
            line2: line2.into(),
            district: district.into(),
            city: city.into(),
            postcode: postcode.into(),
        }
    }
}

/// Payment card supplied to `pay`. Never stored on the order.
#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    pub number: String,
    pub holder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        holder: impl Into<String>,
        expiry_month: u8,
        expiry_year: u16,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            expiry_month,
            expiry_year,
        }
    }

    /// The card number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let hidden = self.number.chars().count().saturating_sub(4);
        let tail: String = self.number.chars().skip(hidden).collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

// Card payloads end up in debug logs
impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.masked_number())
            .field("holder", &self.holder)
            .field("expiry", &format_args!("{:02}/{}", self.expiry_month, self.expiry_year))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_debug_hides_number() {
        let card = Card::new("4000000000000002", "JohnCena", 2, 2023);
        let rendered = format!("{:?}", card);
        assert!(rendered.contains("************0002"));
        assert!(!rendered.contains("4000000000000002"));
        assert!(rendered.contains("02/2023"));
    }

    #[test]
    fn test_short_card_number_is_not_padded() {
        assert_eq!(Card::new("123", "JohnCena", 2, 2023).masked_number(), "123");
    }

    #[test]
    fn test_masking_counts_characters() {
        // Full-width digits are three bytes each
        let card = Card::new("４１１１２２２２", "JohnCena", 2, 2023);
        assert_eq!(card.masked_number(), "****２２２２");
    }
}
