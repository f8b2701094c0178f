use csv::StringRecord;

use crate::Money;

/// A sales agent from the roster
///
/// The agent accumulates the revenue of every sale resolved against it.
/// The total starts at zero and only grows by `quantity × unit price`;
/// since [`Money`](crate::Money) is unsigned it can never decrease.
#[derive(Debug)]
pub struct Agent {
    document_type: String,
    document_number: String,
    first_names: String,
    last_names: String,
    total_sales: Money,
}

impl Agent {
    /// Creates a new agent with no recorded revenue
    pub fn new(
        document_type: impl Into<String>,
        document_number: impl Into<String>,
        first_names: impl Into<String>,
        last_names: impl Into<String>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            document_number: document_number.into(),
            first_names: first_names.into(),
            last_names: last_names.into(),
            total_sales: Money::ZERO,
        }
    }

    /// Parses a roster line of the form
    /// `documentType;documentNumber;firstNames;lastNames`
    ///
    /// Records with fewer than four fields are not agents; extra fields
    /// are ignored.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        match (record.get(0), record.get(1), record.get(2), record.get(3)) {
            (Some(document_type), Some(document_number), Some(first_names), Some(last_names)) => {
                Some(Self::new(document_type, document_number, first_names, last_names))
            }
            _ => None,
        }
    }

    /// The type of the identity document, e.g. `CC`
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// The document number, the unique key of the agent
    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    /// First and last names joined by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }

    /// The revenue accumulated so far
    pub fn total_sales(&self) -> Money {
        self.total_sales
    }

    /// Records revenue from one resolved sale
    pub fn record_sale(&mut self, amount: Money) {
        self.total_sales += amount;
    }
}

impl serde::Serialize for Agent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut row = serializer.serialize_struct("Agent", 2)?;

        row.serialize_field("Nombre", &self.full_name())?;
        row.serialize_field("TotalVentas", &format!("{:.2}", self.total_sales))?;

        row.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_agent_has_no_revenue() {
        let agent = Agent::new("CC", "111", "Ana", "Lopez");
        assert_eq!(agent.total_sales(), Money::ZERO);
    }

    #[test]
    fn full_name_joins_first_and_last_names() {
        let agent = Agent::new("CC", "111", "Ana", "Lopez");
        assert_eq!(agent.full_name(), "Ana Lopez");
    }

    #[test]
    fn record_sale_accumulates() {
        let mut agent = Agent::new("CC", "111", "Ana", "Lopez");
        agent.record_sale(Money::from_num(300));
        agent.record_sale(Money::from_num(12.5));
        assert_eq!(agent.total_sales(), Money::from_num(312.5));
    }

    #[test]
    fn from_record_parses_a_roster_line() {
        let record = StringRecord::from(vec!["CC", "1234567890", "Juan", "García"]);
        let agent = Agent::from_record(&record).unwrap();

        assert_eq!(agent.document_type(), "CC");
        assert_eq!(agent.document_number(), "1234567890");
        assert_eq!(agent.full_name(), "Juan García");
    }

    #[test]
    fn short_record_is_not_an_agent() {
        let record = StringRecord::from(vec!["CC", "1234567890", "Juan"]);
        assert!(Agent::from_record(&record).is_none());
    }
}
