use super::{expect_row, new_id, now, CasaStore};
use crate::{
    entities::{Campaign, NewCampaign},
    error::{CasaError, CasaResult},
};
use rusqlite::{params, OptionalExtension, Row};

const CAMPAIGN_COLUMNS: &str =
    "id, title, channel, segment_name, prompt, content, asset_kind, created_at";

fn campaign_from_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    Ok(Campaign {
        id: row.get(0)?,
        title: row.get(1)?,
        channel: row.get(2)?,
        segment_name: row.get(3)?,
        prompt: row.get(4)?,
        content: row.get(5)?,
        asset_kind: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl CasaStore {
    // ── Campaign ──────────────────────────────────────────────────

    pub fn insert_campaign(&self, c: &NewCampaign) -> CasaResult<Campaign> {
        c.validate()?;
        let record = Campaign {
            id: new_id(),
            title: c.title.clone(),
            channel: c.channel.clone(),
            segment_name: c.segment_name.clone(),
            prompt: c.prompt.clone(),
            content: c.content.clone(),
            asset_kind: c.asset_kind.clone(),
            created_at: now(),
        };
        self.conn.execute(
            "INSERT INTO campaign (
                id, title, channel, segment_name, prompt, content, asset_kind, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &record.id,
                &record.title,
                &record.channel,
                &record.segment_name,
                &record.prompt,
                &record.content,
                &record.asset_kind,
                &record.created_at,
            ],
        )?;
        Ok(record)
    }

    /// Newest first.
    pub fn list_campaigns(&self) -> CasaResult<Vec<Campaign>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaign ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map([], campaign_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_campaign(&self, id: &str) -> CasaResult<Campaign> {
        self.conn
            .query_row(
                &format!("SELECT {CAMPAIGN_COLUMNS} FROM campaign WHERE id = ?1"),
                params![id],
                campaign_from_row,
            )
            .optional()?
            .ok_or_else(|| CasaError::NotFound {
                entity: "campaign",
                id: id.to_string(),
            })
    }

    pub fn delete_campaign(&self, id: &str) -> CasaResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM campaign WHERE id = ?1", params![id])?;
        expect_row(changed, "campaign", id)
    }
}
