use super::{expect_row, new_id, now, CasaStore};
use crate::{
    entities::{Competitor, NewCompetitor},
    error::{CasaError, CasaResult},
};
use rusqlite::{params, OptionalExtension, Row};

const COMPETITOR_COLUMNS: &str =
    "id, name, market_share, price_position, threat_level, notes, created_at";

fn competitor_from_row(row: &Row<'_>) -> rusqlite::Result<Competitor> {
    Ok(Competitor {
        id: row.get(0)?,
        name: row.get(1)?,
        market_share: row.get(2)?,
        price_position: row.get(3)?,
        threat_level: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl CasaStore {
    // ── Competitor ────────────────────────────────────────────────

    pub fn insert_competitor(&self, c: &NewCompetitor) -> CasaResult<Competitor> {
        c.validate()?;
        let record = Competitor {
            id: new_id(),
            name: c.name.clone(),
            market_share: c.market_share,
            price_position: c.price_position.clone(),
            threat_level: c.threat_level.clone(),
            notes: c.notes.clone(),
            created_at: now(),
        };
        self.conn.execute(
            "INSERT INTO competitor (
                id, name, market_share, price_position, threat_level, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &record.id,
                &record.name,
                record.market_share,
                &record.price_position,
                &record.threat_level,
                &record.notes,
                &record.created_at,
            ],
        )?;
        Ok(record)
    }

    /// Largest market share first.
    pub fn list_competitors(&self) -> CasaResult<Vec<Competitor>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMPETITOR_COLUMNS} FROM competitor ORDER BY market_share DESC, name ASC"
        ))?;
        let rows = stmt.query_map([], competitor_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_competitor(&self, id: &str) -> CasaResult<Competitor> {
        self.conn
            .query_row(
                &format!("SELECT {COMPETITOR_COLUMNS} FROM competitor WHERE id = ?1"),
                params![id],
                competitor_from_row,
            )
            .optional()?
            .ok_or_else(|| CasaError::NotFound {
                entity: "competitor",
                id: id.to_string(),
            })
    }

    pub fn update_competitor(&self, id: &str, c: &NewCompetitor) -> CasaResult<Competitor> {
        c.validate()?;
        let changed = self.conn.execute(
            "UPDATE competitor SET name = ?1, market_share = ?2, price_position = ?3,
                    threat_level = ?4, notes = ?5
             WHERE id = ?6",
            params![
                &c.name,
                c.market_share,
                &c.price_position,
                &c.threat_level,
                &c.notes,
                id
            ],
        )?;
        expect_row(changed, "competitor", id)?;
        self.get_competitor(id)
    }

    pub fn delete_competitor(&self, id: &str) -> CasaResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM competitor WHERE id = ?1", params![id])?;
        expect_row(changed, "competitor", id)
    }
}
