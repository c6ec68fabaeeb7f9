use rusqlite::{params, OptionalExtension, Row};

use hostel_core::{MenuDay, Result};

use crate::store::{today_weekday, Store};

pub(crate) fn map_menu_day(row: &Row<'_>) -> rusqlite::Result<MenuDay> {
    Ok(MenuDay {
        id: row.get(0)?,
        day: row.get(1)?,
        breakfast: row.get(2)?,
        lunch: row.get(3)?,
        snacks: row.get(4)?,
        dinner: row.get(5)?,
    })
}

const MENU_COLUMNS: &str = "id, day, breakfast, lunch, snacks, dinner";

impl Store {
    /// Full week in calendar order regardless of insertion order.
    pub fn weekly_menu(&self) -> Result<Vec<MenuDay>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MENU_COLUMNS} FROM menu
             ORDER BY CASE day
                 WHEN 'Monday' THEN 1 WHEN 'Tuesday' THEN 2 WHEN 'Wednesday' THEN 3
                 WHEN 'Thursday' THEN 4 WHEN 'Friday' THEN 5 WHEN 'Saturday' THEN 6
                 WHEN 'Sunday' THEN 7 END"
        ))?;
        let menu = stmt
            .query_map([], map_menu_day)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(menu)
    }

    pub fn menu_for(&self, day: &str) -> Result<Option<MenuDay>> {
        let conn = self.conn();
        let row = conn
            .query_row(
                &format!("SELECT {MENU_COLUMNS} FROM menu WHERE day = ?1"),
                params![day],
                map_menu_day,
            )
            .optional()?;
        Ok(row)
    }

    pub fn todays_menu(&self) -> Result<Option<MenuDay>> {
        self.menu_for(&today_weekday())
    }
}
