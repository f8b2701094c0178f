use csv::StringRecord;

use crate::record::RecordError;
use crate::Money;

/// A product from the catalog
///
/// Besides its catalog identity, a product counts the units sold across
/// every processed sales file. The counter starts at zero and only ever
/// grows; the identity fields never change after loading.
#[derive(Debug)]
pub struct Product {
    id: String,
    name: String,
    unit_price: Money,
    quantity_sold: u64,
}

impl Product {
    /// Creates a new product with no recorded sales
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity_sold: 0,
        }
    }

    /// Parses a catalog line of the form `id;name;unitPrice`
    ///
    /// Records with fewer than three fields are not products and yield
    /// `Ok(None)`; extra fields are ignored. A price that does not parse
    /// as a number is an error.
    pub fn from_record(record: &StringRecord) -> Result<Option<Self>, RecordError> {
        let (id, name, price) = match (record.get(0), record.get(1), record.get(2)) {
            (Some(id), Some(name), Some(price)) => (id, name, price),
            _ => return Ok(None),
        };
        let unit_price = price.parse().map_err(|source| RecordError::InvalidPrice {
            value: price.to_owned(),
            source,
        })?;

        Ok(Some(Self::new(id, name, unit_price)))
    }

    /// The catalog identifier of the product
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name of the product
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The price of a single unit
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// The number of units sold so far
    pub fn quantity_sold(&self) -> u64 {
        self.quantity_sold
    }

    /// Records the sale of `quantity` units
    pub fn record_sale(&mut self, quantity: u32) {
        self.quantity_sold += u64::from(quantity);
    }
}

impl serde::Serialize for Product {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut row = serializer.serialize_struct("Product", 3)?;

        row.serialize_field("Nombre", &self.name)?;
        row.serialize_field("Precio", &crate::report::format_price(self.unit_price))?;
        row.serialize_field("CantidadVendida", &self.quantity_sold)?;

        row.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_has_no_sales() {
        let product = Product::new("P001", "Laptop", Money::from_num(543_210));
        assert_eq!(product.quantity_sold(), 0);
    }

    #[test]
    fn record_sale_accumulates() {
        let mut product = Product::new("P001", "Laptop", Money::from_num(100));
        product.record_sale(3);
        product.record_sale(2);
        assert_eq!(product.quantity_sold(), 5);
    }

    #[test]
    fn from_record_parses_a_catalog_line() {
        let record = StringRecord::from(vec!["P001", "Laptop", "543210.0"]);
        let product = Product::from_record(&record).unwrap().unwrap();

        assert_eq!(product.id(), "P001");
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.unit_price(), Money::from_num(543_210));
    }

    #[test]
    fn short_record_is_not_a_product() {
        let record = StringRecord::from(vec!["P001", "Laptop"]);
        assert!(Product::from_record(&record).unwrap().is_none());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let record = StringRecord::from(vec!["P001", "Laptop", "10.5", "extra"]);
        let product = Product::from_record(&record).unwrap().unwrap();
        assert_eq!(product.unit_price(), Money::from_num(10.5));
    }

    #[test]
    fn non_numeric_price_is_an_error() {
        let record = StringRecord::from(vec!["P001", "Laptop", "caro"]);
        assert!(matches!(
            Product::from_record(&record),
            Err(RecordError::InvalidPrice { ref value, .. }) if value == "caro"
        ));
    }
}
