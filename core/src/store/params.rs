use super::ValuationStore;
use crate::{
    error::{ValuationError, ValuationResult},
    types::GlobalParams,
};
use rusqlite::{params, OptionalExtension};

impl ValuationStore {
    /// Write the singleton configuration record, replacing any prior one.
    pub fn set_global_params(&self, p: &GlobalParams) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO global_params (id, sales_margin, tax_rate, discount_rate)
             VALUES (1, ?1, ?2, ?3)",
            params![p.sales_margin, p.tax_rate, p.discount_rate],
        )?;
        Ok(())
    }

    /// The singleton configuration record. Its absence is a configuration
    /// error, not an empty result.
    pub fn global_params(&self) -> ValuationResult<GlobalParams> {
        self.conn
            .query_row(
                "SELECT sales_margin, tax_rate, discount_rate FROM global_params WHERE id = 1",
                [],
                |row| {
                    Ok(GlobalParams {
                        sales_margin: row.get(0)?,
                        tax_rate: row.get(1)?,
                        discount_rate: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or(ValuationError::MissingConfiguration)
    }
}
