use super::ValuationStore;
use crate::{
    error::ValuationResult,
    types::{Region, ScheduleEntry, Year},
};
use rusqlite::params;

impl ValuationStore {
    pub fn insert_patient_schedule(
        &self,
        asset_id: &str,
        region: Region,
        year: Year,
        patient_count: i64,
    ) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT INTO patient_schedule (asset_id, region, year, patient_count)
             VALUES (?1, ?2, ?3, ?4)",
            params![asset_id, region.as_str(), year, patient_count],
        )?;
        Ok(())
    }

    /// All schedule rows for one (asset, region), ordered by year.
    pub fn patient_schedule(
        &self,
        asset_id: &str,
        region: Region,
    ) -> ValuationResult<Vec<ScheduleEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT year, patient_count FROM patient_schedule
             WHERE asset_id = ?1 AND region = ?2
             ORDER BY year ASC",
        )?;
        let entries = stmt
            .query_map(params![asset_id, region.as_str()], |row| {
                Ok(ScheduleEntry {
                    year: row.get(0)?,
                    patient_count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
