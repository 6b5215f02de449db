use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{HealthReport, ReportType};

/// Insert a report metadata record.
pub fn insert_report(conn: &Connection, report: &HealthReport) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_reports (id, user_id, report_date, report_type, title, doctor_name, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            report.id.to_string(),
            report.user_id,
            report.report_date.format("%Y-%m-%d").to_string(),
            report.report_type.as_str(),
            report.title,
            report.doctor_name,
            report.notes,
        ],
    )?;
    Ok(())
}

/// Most recent reports for a user, ordered by report_date descending.
pub fn get_recent_reports(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<HealthReport>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, report_date, report_type, title, doctor_name, notes
         FROM health_reports
         WHERE user_id = ?1
         ORDER BY report_date DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![user_id, limit], row_to_report)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn row_to_report(row: &rusqlite::Row) -> Result<HealthReport, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let date_str: String = row.get(2)?;
    let type_str: String = row.get(3)?;

    Ok(HealthReport {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        user_id: row.get(1)?,
        report_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        report_type: ReportType::from_str(&type_str).unwrap_or_default(),
        title: row.get(4)?,
        doctor_name: row.get(5)?,
        notes: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::profile::insert_profile;
    use crate::db::sqlite::open_memory_database;
    use crate::models::UserProfile;

    fn setup() -> Connection {
        let conn = open_memory_database().unwrap();
        insert_profile(
            &conn,
            &UserProfile {
                id: "user-1".into(),
                full_name: "Jordan Reyes".into(),
                email: "jordan@example.com".into(),
                phone: None,
                blood_group: None,
                date_of_birth: None,
                chronic_conditions: Vec::new(),
                allergies: Vec::new(),
                api_token_hash: None,
            },
        )
        .unwrap();
        conn
    }

    fn report_on(day: u32) -> HealthReport {
        HealthReport {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            report_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            report_type: ReportType::LabReport,
            title: format!("CBC panel {day}"),
            doctor_name: Some("Dr. Osei".into()),
            notes: None,
        }
    }

    #[test]
    fn insert_and_list_ordered_desc() {
        let conn = setup();
        for day in 1..=3 {
            insert_report(&conn, &report_on(day)).unwrap();
        }
        let reports = get_recent_reports(&conn, "user-1", 10).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].report_date, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        assert_eq!(reports[0].report_type, ReportType::LabReport);
    }

    #[test]
    fn limit_caps_result_set() {
        let conn = setup();
        for day in 1..=12 {
            insert_report(&conn, &report_on(day)).unwrap();
        }
        let reports = get_recent_reports(&conn, "user-1", 10).unwrap();
        assert_eq!(reports.len(), 10);
    }
}
