use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::UserProfile;

/// Insert a user profile.
pub fn insert_profile(conn: &Connection, profile: &UserProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO profiles (id, full_name, email, phone, blood_group, date_of_birth,
                               chronic_conditions, allergies, api_token_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            profile.id,
            profile.full_name,
            profile.email,
            profile.phone,
            profile.blood_group,
            profile
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string()),
            serde_json::to_string(&profile.chronic_conditions).unwrap_or_else(|_| "[]".into()),
            serde_json::to_string(&profile.allergies).unwrap_or_else(|_| "[]".into()),
            profile.api_token_hash,
        ],
    )?;
    Ok(())
}

/// Fetch a profile by user id.
pub fn get_profile(conn: &Connection, user_id: &str) -> Result<UserProfile, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, email, phone, blood_group, date_of_birth,
                chronic_conditions, allergies, api_token_hash
         FROM profiles WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![user_id], row_to_profile)?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(DatabaseError::NotFound {
            entity_type: "profile".into(),
            id: user_id.to_string(),
        }),
    }
}

/// All profiles, used to seed the token registry at startup.
pub fn list_profiles(conn: &Connection) -> Result<Vec<UserProfile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, email, phone, blood_group, date_of_birth,
                chronic_conditions, allergies, api_token_hash
         FROM profiles ORDER BY full_name",
    )?;
    let rows = stmt.query_map([], row_to_profile)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn row_to_profile(row: &rusqlite::Row) -> Result<UserProfile, rusqlite::Error> {
    let dob: Option<String> = row.get(5)?;
    let conditions_json: String = row.get(6)?;
    let allergies_json: String = row.get(7)?;

    Ok(UserProfile {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        blood_group: row.get(4)?,
        date_of_birth: dob.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        chronic_conditions: serde_json::from_str(&conditions_json).unwrap_or_default(),
        allergies: serde_json::from_str(&allergies_json).unwrap_or_default(),
        api_token_hash: row.get(8)?,
    })
}
