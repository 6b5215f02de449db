//! Health-log repository. Queries return logs most recent first; the
//! aggregation pipeline always works on such a read snapshot.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{HealthLog, MoodType, SymptomSeverity};

/// Partial update for an existing log. Any recordable field may be
/// given; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct HealthLogUpdate {
    pub temperature: Option<f64>,
    pub blood_pressure_systolic: Option<u16>,
    pub blood_pressure_diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub blood_sugar: Option<f64>,
    pub has_fever: Option<bool>,
    pub has_cough: Option<bool>,
    pub has_headache: Option<bool>,
    pub has_fatigue: Option<bool>,
    pub has_body_pain: Option<bool>,
    pub has_nausea: Option<bool>,
    pub pain_level: Option<SymptomSeverity>,
    pub symptom_severity: Option<SymptomSeverity>,
    pub mood: Option<MoodType>,
    pub stress_level: Option<u8>,
    pub anxiety_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<u8>,
    pub water_intake: Option<f64>,
    pub exercise_minutes: Option<u32>,
    pub medications_taken: Option<Vec<String>>,
    pub notes: Option<String>,
    pub symptoms_description: Option<String>,
}

impl HealthLogUpdate {
    /// Merge into an existing log. Lets callers validate the merged
    /// record before persisting the patch.
    pub fn apply_to(&self, log: &mut HealthLog) {
        if let Some(v) = self.temperature {
            log.temperature = Some(v);
        }
        if let Some(v) = self.blood_pressure_systolic {
            log.blood_pressure_systolic = Some(v);
        }
        if let Some(v) = self.blood_pressure_diastolic {
            log.blood_pressure_diastolic = Some(v);
        }
        if let Some(v) = self.heart_rate {
            log.heart_rate = Some(v);
        }
        if let Some(v) = self.oxygen_saturation {
            log.oxygen_saturation = Some(v);
        }
        if let Some(v) = self.weight {
            log.weight = Some(v);
        }
        if let Some(v) = self.blood_sugar {
            log.blood_sugar = Some(v);
        }
        if let Some(v) = self.has_fever {
            log.has_fever = v;
        }
        if let Some(v) = self.has_cough {
            log.has_cough = v;
        }
        if let Some(v) = self.has_headache {
            log.has_headache = v;
        }
        if let Some(v) = self.has_fatigue {
            log.has_fatigue = v;
        }
        if let Some(v) = self.has_body_pain {
            log.has_body_pain = v;
        }
        if let Some(v) = self.has_nausea {
            log.has_nausea = v;
        }
        if let Some(v) = self.pain_level {
            log.pain_level = v;
        }
        if let Some(v) = self.symptom_severity {
            log.symptom_severity = v;
        }
        if let Some(v) = self.mood {
            log.mood = v;
        }
        if let Some(v) = self.stress_level {
            log.stress_level = v;
        }
        if let Some(v) = self.anxiety_level {
            log.anxiety_level = v;
        }
        if let Some(v) = self.sleep_hours {
            log.sleep_hours = Some(v);
        }
        if let Some(v) = self.sleep_quality {
            log.sleep_quality = v;
        }
        if let Some(v) = self.water_intake {
            log.water_intake = Some(v);
        }
        if let Some(v) = self.exercise_minutes {
            log.exercise_minutes = Some(v);
        }
        if let Some(v) = &self.medications_taken {
            log.medications_taken = v.clone();
        }
        if let Some(v) = &self.notes {
            log.notes = Some(v.clone());
        }
        if let Some(v) = &self.symptoms_description {
            log.symptoms_description = Some(v.clone());
        }
    }
}

/// Insert a health log record.
pub fn insert_health_log(conn: &Connection, log: &HealthLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_logs (
            id, user_id, log_date,
            temperature, blood_pressure_systolic, blood_pressure_diastolic,
            heart_rate, oxygen_saturation, weight, blood_sugar,
            has_fever, has_cough, has_headache, has_fatigue, has_body_pain, has_nausea,
            pain_level, symptom_severity, mood, stress_level, anxiety_level,
            sleep_hours, sleep_quality, water_intake, exercise_minutes,
            medications_taken, notes, symptoms_description, created_at, updated_at
         ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
            ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
            ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30
         )",
        params![
            log.id.to_string(),
            log.user_id,
            log.log_date.format("%Y-%m-%d").to_string(),
            log.temperature,
            log.blood_pressure_systolic,
            log.blood_pressure_diastolic,
            log.heart_rate,
            log.oxygen_saturation,
            log.weight,
            log.blood_sugar,
            log.has_fever,
            log.has_cough,
            log.has_headache,
            log.has_fatigue,
            log.has_body_pain,
            log.has_nausea,
            log.pain_level.as_str(),
            log.symptom_severity.as_str(),
            log.mood.as_str(),
            log.stress_level,
            log.anxiety_level,
            log.sleep_hours,
            log.sleep_quality,
            log.water_intake,
            log.exercise_minutes,
            serde_json::to_string(&log.medications_taken).unwrap_or_else(|_| "[]".into()),
            log.notes,
            log.symptoms_description,
            log.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            log.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

/// Most recent logs for a user, ordered by log_date descending.
pub fn get_recent_logs(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<HealthLog>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM health_logs
         WHERE user_id = ?1
         ORDER BY log_date DESC
         LIMIT ?2",
    ))?;
    let rows = stmt.query_map(params![user_id, limit], row_to_health_log)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Most recent logs that have sleep data, ordered by log_date descending.
pub fn get_recent_logs_with_sleep(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<HealthLog>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM health_logs
         WHERE user_id = ?1 AND sleep_hours IS NOT NULL
         ORDER BY log_date DESC
         LIMIT ?2",
    ))?;
    let rows = stmt.query_map(params![user_id, limit], row_to_health_log)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Fetch a single log owned by the given user.
pub fn get_log_by_id(
    conn: &Connection,
    user_id: &str,
    id: &Uuid,
) -> Result<HealthLog, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM health_logs WHERE id = ?1 AND user_id = ?2",
    ))?;
    let mut rows = stmt.query_map(params![id.to_string(), user_id], row_to_health_log)?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(DatabaseError::NotFound {
            entity_type: "health_log".into(),
            id: id.to_string(),
        }),
    }
}

/// Apply a partial update to a log owned by the given user.
pub fn update_health_log(
    conn: &Connection,
    user_id: &str,
    id: &Uuid,
    update: &HealthLogUpdate,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE health_logs SET
            temperature = COALESCE(?3, temperature),
            blood_pressure_systolic = COALESCE(?4, blood_pressure_systolic),
            blood_pressure_diastolic = COALESCE(?5, blood_pressure_diastolic),
            heart_rate = COALESCE(?6, heart_rate),
            oxygen_saturation = COALESCE(?7, oxygen_saturation),
            weight = COALESCE(?8, weight),
            blood_sugar = COALESCE(?9, blood_sugar),
            has_fever = COALESCE(?10, has_fever),
            has_cough = COALESCE(?11, has_cough),
            has_headache = COALESCE(?12, has_headache),
            has_fatigue = COALESCE(?13, has_fatigue),
            has_body_pain = COALESCE(?14, has_body_pain),
            has_nausea = COALESCE(?15, has_nausea),
            pain_level = COALESCE(?16, pain_level),
            symptom_severity = COALESCE(?17, symptom_severity),
            mood = COALESCE(?18, mood),
            stress_level = COALESCE(?19, stress_level),
            anxiety_level = COALESCE(?20, anxiety_level),
            sleep_hours = COALESCE(?21, sleep_hours),
            sleep_quality = COALESCE(?22, sleep_quality),
            water_intake = COALESCE(?23, water_intake),
            exercise_minutes = COALESCE(?24, exercise_minutes),
            medications_taken = COALESCE(?25, medications_taken),
            notes = COALESCE(?26, notes),
            symptoms_description = COALESCE(?27, symptoms_description),
            updated_at = datetime('now')
         WHERE id = ?1 AND user_id = ?2",
        params![
            id.to_string(),
            user_id,
            update.temperature,
            update.blood_pressure_systolic,
            update.blood_pressure_diastolic,
            update.heart_rate,
            update.oxygen_saturation,
            update.weight,
            update.blood_sugar,
            update.has_fever,
            update.has_cough,
            update.has_headache,
            update.has_fatigue,
            update.has_body_pain,
            update.has_nausea,
            update.pain_level.map(|s| s.as_str()),
            update.symptom_severity.map(|s| s.as_str()),
            update.mood.map(|m| m.as_str()),
            update.stress_level,
            update.anxiety_level,
            update.sleep_hours,
            update.sleep_quality,
            update.water_intake,
            update.exercise_minutes,
            update
                .medications_taken
                .as_ref()
                .map(|m| serde_json::to_string(m).unwrap_or_else(|_| "[]".into())),
            update.notes,
            update.symptoms_description,
        ],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "health_log".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

const COLUMNS: &str = "id, user_id, log_date,
    temperature, blood_pressure_systolic, blood_pressure_diastolic,
    heart_rate, oxygen_saturation, weight, blood_sugar,
    has_fever, has_cough, has_headache, has_fatigue, has_body_pain, has_nausea,
    pain_level, symptom_severity, mood, stress_level, anxiety_level,
    sleep_hours, sleep_quality, water_intake, exercise_minutes,
    medications_taken, notes, symptoms_description, created_at, updated_at";

fn row_to_health_log(row: &rusqlite::Row) -> Result<HealthLog, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let date_str: String = row.get(2)?;
    let pain_str: String = row.get(16)?;
    let severity_str: String = row.get(17)?;
    let mood_str: String = row.get(18)?;
    let meds_json: String = row.get(25)?;
    let created_str: String = row.get(28)?;
    let updated_str: String = row.get(29)?;

    Ok(HealthLog {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        user_id: row.get(1)?,
        log_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        temperature: row.get(3)?,
        blood_pressure_systolic: row.get(4)?,
        blood_pressure_diastolic: row.get(5)?,
        heart_rate: row.get(6)?,
        oxygen_saturation: row.get(7)?,
        weight: row.get(8)?,
        blood_sugar: row.get(9)?,
        has_fever: row.get(10)?,
        has_cough: row.get(11)?,
        has_headache: row.get(12)?,
        has_fatigue: row.get(13)?,
        has_body_pain: row.get(14)?,
        has_nausea: row.get(15)?,
        pain_level: SymptomSeverity::from_str(&pain_str).unwrap_or_default(),
        symptom_severity: SymptomSeverity::from_str(&severity_str).unwrap_or_default(),
        mood: MoodType::from_str(&mood_str).unwrap_or_default(),
        stress_level: row.get(19)?,
        anxiety_level: row.get(20)?,
        sleep_hours: row.get(21)?,
        sleep_quality: row.get(22)?,
        water_intake: row.get(23)?,
        exercise_minutes: row.get(24)?,
        medications_taken: serde_json::from_str(&meds_json).unwrap_or_default(),
        notes: row.get(26)?,
        symptoms_description: row.get(27)?,
        created_at: NaiveDateTime::parse_from_str(&created_str, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        updated_at: NaiveDateTime::parse_from_str(&updated_str, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
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

    fn log_on(day: u32) -> HealthLog {
        HealthLog::new("user-1", NaiveDate::from_ymd_opt(2026, 3, day).unwrap())
    }

    #[test]
    fn insert_and_fetch_round_trips() {
        let conn = setup();
        let mut log = log_on(1);
        log.temperature = Some(36.8);
        log.blood_pressure_systolic = Some(120);
        log.blood_pressure_diastolic = Some(80);
        log.sleep_hours = Some(7.5);
        log.mood = MoodType::Good;
        log.has_headache = true;
        log.medications_taken = vec!["ibuprofen".into()];
        insert_health_log(&conn, &log).unwrap();

        let fetched = get_log_by_id(&conn, "user-1", &log.id).unwrap();
        assert_eq!(fetched.temperature, Some(36.8));
        assert_eq!(fetched.blood_pressure_systolic, Some(120));
        assert_eq!(fetched.sleep_hours, Some(7.5));
        assert_eq!(fetched.mood, MoodType::Good);
        assert!(fetched.has_headache);
        assert_eq!(fetched.medications_taken, vec!["ibuprofen".to_string()]);
    }

    #[test]
    fn recent_logs_ordered_desc_and_limited() {
        let conn = setup();
        for day in 1..=5 {
            insert_health_log(&conn, &log_on(day)).unwrap();
        }
        let logs = get_recent_logs(&conn, "user-1", 3).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].log_date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(logs[2].log_date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }

    #[test]
    fn sleep_query_skips_logs_without_sleep() {
        let conn = setup();
        let mut with_sleep = log_on(1);
        with_sleep.sleep_hours = Some(6.0);
        insert_health_log(&conn, &with_sleep).unwrap();
        insert_health_log(&conn, &log_on(2)).unwrap();

        let logs = get_recent_logs_with_sleep(&conn, "user-1", 30).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].sleep_hours, Some(6.0));
    }

    #[test]
    fn recent_logs_scoped_to_user() {
        let conn = setup();
        insert_health_log(&conn, &log_on(1)).unwrap();
        let logs = get_recent_logs(&conn, "someone-else", 10).unwrap();
        assert!(logs.is_empty());
    }

    #[test]
    fn partial_update_touches_only_given_fields() {
        let conn = setup();
        let mut log = log_on(1);
        log.temperature = Some(36.5);
        log.sleep_hours = Some(8.0);
        insert_health_log(&conn, &log).unwrap();

        update_health_log(
            &conn,
            "user-1",
            &log.id,
            &HealthLogUpdate {
                mood: Some(MoodType::Low),
                notes: Some("rough day".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let fetched = get_log_by_id(&conn, "user-1", &log.id).unwrap();
        assert_eq!(fetched.mood, MoodType::Low);
        assert_eq!(fetched.notes.as_deref(), Some("rough day"));
        assert_eq!(fetched.temperature, Some(36.5));
        assert_eq!(fetched.sleep_hours, Some(8.0));
    }

    #[test]
    fn update_covers_every_recordable_field() {
        let conn = setup();
        let log = log_on(1);
        insert_health_log(&conn, &log).unwrap();

        update_health_log(
            &conn,
            "user-1",
            &log.id,
            &HealthLogUpdate {
                stress_level: Some(8),
                has_fever: Some(true),
                water_intake: Some(2.5),
                heart_rate: Some(72),
                symptom_severity: Some(SymptomSeverity::Moderate),
                medications_taken: Some(vec!["paracetamol".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        let fetched = get_log_by_id(&conn, "user-1", &log.id).unwrap();
        assert_eq!(fetched.stress_level, 8);
        assert!(fetched.has_fever);
        assert_eq!(fetched.water_intake, Some(2.5));
        assert_eq!(fetched.heart_rate, Some(72));
        assert_eq!(fetched.symptom_severity, SymptomSeverity::Moderate);
        assert_eq!(fetched.medications_taken, vec!["paracetamol".to_string()]);
        // untouched fields keep their values
        assert_eq!(fetched.anxiety_level, 5);
        assert!(!fetched.has_cough);
    }

    #[test]
    fn apply_to_merges_only_given_fields() {
        let mut log = log_on(1);
        log.sleep_hours = Some(8.0);

        let update = HealthLogUpdate {
            stress_level: Some(9),
            has_nausea: Some(true),
            notes: Some("late entry".into()),
            ..Default::default()
        };
        update.apply_to(&mut log);

        assert_eq!(log.stress_level, 9);
        assert!(log.has_nausea);
        assert_eq!(log.notes.as_deref(), Some("late entry"));
        assert_eq!(log.sleep_hours, Some(8.0));
        assert_eq!(log.mood, MoodType::Okay);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let conn = setup();
        let err = update_health_log(
            &conn,
            "user-1",
            &Uuid::new_v4(),
            &HealthLogUpdate::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn update_cannot_cross_users() {
        let conn = setup();
        let log = log_on(1);
        insert_health_log(&conn, &log).unwrap();
        let err = update_health_log(
            &conn,
            "someone-else",
            &log.id,
            &HealthLogUpdate::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
