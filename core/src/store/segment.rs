use super::{expect_row, new_id, now, CasaStore};
use crate::{
    entities::{NewSegment, Segment},
    error::{CasaError, CasaResult},
};
use rusqlite::{params, OptionalExtension, Row};

const SEGMENT_COLUMNS: &str =
    "id, name, description, customer_count, churn_rate, avg_clv, health_score, created_at";

fn segment_from_row(row: &Row<'_>) -> rusqlite::Result<Segment> {
    Ok(Segment {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        customer_count: row.get(3)?,
        churn_rate: row.get(4)?,
        avg_clv: row.get(5)?,
        health_score: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl CasaStore {
    // ── Segment ───────────────────────────────────────────────────

    pub fn insert_segment(&self, s: &NewSegment) -> CasaResult<Segment> {
        s.validate()?;
        let record = Segment {
            id: new_id(),
            name: s.name.clone(),
            description: s.description.clone(),
            customer_count: s.customer_count,
            churn_rate: s.churn_rate,
            avg_clv: s.avg_clv,
            health_score: s.health_score,
            created_at: now(),
        };
        self.conn.execute(
            "INSERT INTO segment (
                id, name, description, customer_count, churn_rate, avg_clv,
                health_score, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &record.id,
                &record.name,
                &record.description,
                record.customer_count,
                record.churn_rate,
                record.avg_clv,
                record.health_score,
                &record.created_at,
            ],
        )?;
        Ok(record)
    }

    pub fn list_segments(&self) -> CasaResult<Vec<Segment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SEGMENT_COLUMNS} FROM segment ORDER BY created_at ASC, name ASC"
        ))?;
        let rows = stmt.query_map([], segment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_segment(&self, id: &str) -> CasaResult<Segment> {
        self.conn
            .query_row(
                &format!("SELECT {SEGMENT_COLUMNS} FROM segment WHERE id = ?1"),
                params![id],
                segment_from_row,
            )
            .optional()?
            .ok_or_else(|| CasaError::NotFound {
                entity: "segment",
                id: id.to_string(),
            })
    }

    /// Replace every mutable field; `created_at` is left untouched.
    pub fn update_segment(&self, id: &str, s: &NewSegment) -> CasaResult<Segment> {
        s.validate()?;
        let changed = self.conn.execute(
            "UPDATE segment SET name = ?1, description = ?2, customer_count = ?3,
                    churn_rate = ?4, avg_clv = ?5, health_score = ?6
             WHERE id = ?7",
            params![
                &s.name,
                &s.description,
                s.customer_count,
                s.churn_rate,
                s.avg_clv,
                s.health_score,
                id
            ],
        )?;
        expect_row(changed, "segment", id)?;
        self.get_segment(id)
    }

    pub fn delete_segment(&self, id: &str) -> CasaResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM segment WHERE id = ?1", params![id])?;
        expect_row(changed, "segment", id)
    }
}
