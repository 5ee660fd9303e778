use super::{expect_row, new_id, now, CasaStore};
use crate::{
    entities::{Initiative, NewInitiative},
    error::{CasaError, CasaResult},
};
use rusqlite::{params, OptionalExtension, Row};

const INITIATIVE_COLUMNS: &str =
    "id, title, description, status, budget, expected_impact, segment_id, created_at";

fn initiative_from_row(row: &Row<'_>) -> rusqlite::Result<Initiative> {
    Ok(Initiative {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        budget: row.get(4)?,
        expected_impact: row.get(5)?,
        segment_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl CasaStore {
    // ── Initiative ────────────────────────────────────────────────

    pub fn insert_initiative(&self, i: &NewInitiative) -> CasaResult<Initiative> {
        i.validate()?;
        self.check_segment_ref(i.segment_id.as_deref())?;
        let record = Initiative {
            id: new_id(),
            title: i.title.clone(),
            description: i.description.clone(),
            status: i.status.clone(),
            budget: i.budget,
            expected_impact: i.expected_impact.clone(),
            segment_id: i.segment_id.clone(),
            created_at: now(),
        };
        self.conn.execute(
            "INSERT INTO initiative (
                id, title, description, status, budget, expected_impact,
                segment_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &record.id,
                &record.title,
                &record.description,
                &record.status,
                record.budget,
                &record.expected_impact,
                &record.segment_id,
                &record.created_at,
            ],
        )?;
        Ok(record)
    }

    pub fn list_initiatives(&self) -> CasaResult<Vec<Initiative>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INITIATIVE_COLUMNS} FROM initiative ORDER BY created_at ASC, title ASC"
        ))?;
        let rows = stmt.query_map([], initiative_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn initiatives_for_segment(&self, segment_id: &str) -> CasaResult<Vec<Initiative>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INITIATIVE_COLUMNS} FROM initiative WHERE segment_id = ?1
             ORDER BY created_at ASC, title ASC"
        ))?;
        let rows = stmt.query_map(params![segment_id], initiative_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_initiative(&self, id: &str) -> CasaResult<Initiative> {
        self.conn
            .query_row(
                &format!("SELECT {INITIATIVE_COLUMNS} FROM initiative WHERE id = ?1"),
                params![id],
                initiative_from_row,
            )
            .optional()?
            .ok_or_else(|| CasaError::NotFound {
                entity: "initiative",
                id: id.to_string(),
            })
    }

    pub fn update_initiative(&self, id: &str, i: &NewInitiative) -> CasaResult<Initiative> {
        i.validate()?;
        self.check_segment_ref(i.segment_id.as_deref())?;
        let changed = self.conn.execute(
            "UPDATE initiative SET title = ?1, description = ?2, status = ?3, budget = ?4,
                    expected_impact = ?5, segment_id = ?6
             WHERE id = ?7",
            params![
                &i.title,
                &i.description,
                &i.status,
                i.budget,
                &i.expected_impact,
                &i.segment_id,
                id
            ],
        )?;
        expect_row(changed, "initiative", id)?;
        self.get_initiative(id)
    }

    pub fn delete_initiative(&self, id: &str) -> CasaResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM initiative WHERE id = ?1", params![id])?;
        expect_row(changed, "initiative", id)
    }

    /// A dangling segment reference is a caller error, not a database one.
    fn check_segment_ref(&self, segment_id: Option<&str>) -> CasaResult<()> {
        let Some(sid) = segment_id else {
            return Ok(());
        };
        match self.get_segment(sid) {
            Ok(_) => Ok(()),
            Err(CasaError::NotFound { .. }) => Err(CasaError::Validation(format!(
                "segment_id '{sid}' does not exist"
            ))),
            Err(e) => Err(e),
        }
    }
}
