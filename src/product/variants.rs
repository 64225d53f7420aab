//! Product variant rows
//!
//! The variant list always holds at least one row. Rows keep their insertion
//! order and are re-indexed contiguously on removal.

use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SKU_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One editable variant row, before validation
///
/// Price and stock hold whatever was entered; the product schema decides
/// whether they are numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantRecord {
    /// Color name (required)
    pub color: String,
    /// Size label (optional)
    pub size: String,
    /// Unit price in naira, as entered
    pub price: Value,
    /// Units in stock, as entered
    pub stock: Value,
    /// Stock keeping unit (optional, may be generated)
    pub sku: String,
}

impl Default for VariantRecord {
    fn default() -> Self {
        Self {
            color: String::new(),
            size: String::new(),
            price: Value::from(0),
            stock: Value::from(0),
            sku: String::new(),
        }
    }
}

/// Ordered variant rows with a minimum of one
#[derive(Debug, Clone, PartialEq)]
pub struct VariantList {
    records: Vec<VariantRecord>,
}

impl Default for VariantList {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantList {
    /// A list holding one empty row
    pub fn new() -> Self {
        Self {
            records: vec![VariantRecord::default()],
        }
    }

    /// A list from existing rows; rejects an empty list
    pub fn from_records(records: Vec<VariantRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::LastVariant);
        }
        Ok(Self { records })
    }

    /// Append an empty row and return its index
    pub fn add(&mut self) -> usize {
        self.records.push(VariantRecord::default());
        self.records.len() - 1
    }

    /// Append a filled row and return its index
    pub fn push(&mut self, record: VariantRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Remove the row at `index`
    ///
    /// Fails when it is the only row left.
    pub fn remove(&mut self, index: usize) -> Result<VariantRecord> {
        self.check_index(index)?;
        if self.records.len() == 1 {
            return Err(Error::LastVariant);
        }
        Ok(self.records.remove(index))
    }

    /// Row at `index`
    pub fn get(&self, index: usize) -> Option<&VariantRecord> {
        self.records.get(index)
    }

    /// Mutable row at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut VariantRecord> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(Error::VariantIndex { index, len })
    }

    /// Number of rows (never zero)
    #[allow(clippy::len_without_is_empty)] // the list is never empty
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Rows in order
    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    /// Iterate over rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, VariantRecord> {
        self.records.iter()
    }

    /// Back to a single empty row
    pub fn reset(&mut self) {
        self.records = vec![VariantRecord::default()];
    }

    /// Fill in a suggested SKU for the row at `index`
    ///
    /// Does nothing and returns `None` while the product name or the row's
    /// color is blank.
    pub fn generate_sku<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        product_name: &str,
        rng: &mut R,
    ) -> Result<Option<String>> {
        let record = self.get_mut(index)?;
        if product_name.trim().is_empty() || record.color.trim().is_empty() {
            return Ok(None);
        }

        let sku = generate_sku(product_name, &record.color, &record.size, rng);
        record.sku.clone_from(&sku);
        Ok(Some(sku))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(Error::VariantIndex {
                index,
                len: self.records.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a VariantList {
    type Item = &'a VariantRecord;
    type IntoIter = std::slice::Iter<'a, VariantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Suggest a SKU: `PRE-COL-SIZE-RND`
///
/// Name and color contribute their first three characters, upper-cased.
/// A blank color becomes `DEF` and a blank size `OS`. The last segment is
/// three random base-36 characters, so SKUs are not guaranteed unique.
pub fn generate_sku<R: Rng + ?Sized>(
    product_name: &str,
    color: &str,
    size: &str,
    rng: &mut R,
) -> String {
    let prefix = head(product_name.trim(), 3);
    let color_code = match color.trim() {
        "" => "DEF".to_string(),
        c => head(c, 3),
    };
    let size_code = match size.trim() {
        "" => "OS".to_string(),
        s => s.to_uppercase(),
    };
    let random: String = (0..3)
        .map(|_| SKU_ALPHABET[rng.gen_range(0..SKU_ALPHABET.len())] as char)
        .collect();

    format!("{prefix}-{color_code}-{size_code}-{random}")
}

fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect::<String>().to_uppercase()
}
