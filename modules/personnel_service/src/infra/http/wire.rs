//! Raw backend record shapes
//!
//! The backend is loosely typed: identifiers and years show up as strings or
//! numbers, optional fields may be missing, `null` or empty. Everything here
//! deserializes leniently; interpretation happens in the mapper.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmployee {
    #[serde(rename = "NIP", default, deserialize_with = "loose_string")]
    pub nip: String,
    #[serde(rename = "Nama", default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(rename = "Tempat_Tanggal_Lahir", default, deserialize_with = "loose_string")]
    pub birth_place_date: String,
    #[serde(rename = "Pendidikan_Terakhir", default, deserialize_with = "loose_string")]
    pub last_education: String,
    #[serde(rename = "Pangkat_Golongan", default, deserialize_with = "loose_string")]
    pub rank: String,
    #[serde(rename = "KGB_Berikutnya", default, deserialize_with = "loose_string")]
    pub next_salary_increment: String,
    #[serde(rename = "TMT", default, deserialize_with = "loose_string")]
    pub rank_effective_date: String,
    #[serde(rename = "Jenis_Kelamin", default, deserialize_with = "loose_string")]
    pub sex: String,
    #[serde(rename = "Agama", default, deserialize_with = "loose_string")]
    pub religion: String,
    #[serde(rename = "Status_Kepegawaian", default, deserialize_with = "loose_string")]
    pub employment_status: String,
    #[serde(rename = "Gaji_Pokok", default, deserialize_with = "loose_count")]
    pub base_salary: u64,
    #[serde(rename = "Jumlah_Anak", default, deserialize_with = "loose_count")]
    pub children: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEducation {
    #[serde(rename = "ID_Pendidikan", default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(rename = "Pegawai", default, deserialize_with = "loose_string")]
    pub employee_ref: String,
    #[serde(rename = "Jenjang", default, deserialize_with = "loose_string")]
    pub level: String,
    #[serde(rename = "Jurusan", default, deserialize_with = "loose_string")]
    pub field_of_study: String,
    #[serde(rename = "Institusi", default, deserialize_with = "loose_string")]
    pub institution: String,
    #[serde(rename = "Tahun_Lulus", default, deserialize_with = "loose_year")]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTraining {
    #[serde(rename = "ID_Penjenjangan", default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(rename = "Pegawai", default, deserialize_with = "loose_string")]
    pub employee_ref: String,
    #[serde(rename = "Nama_Penjenjangan", default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(rename = "Tahun_Pelaksanaan", default, deserialize_with = "loose_year")]
    pub year: Option<i32>,
    #[serde(rename = "Penyelenggara", default, deserialize_with = "loose_string")]
    pub organizer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCareerNote {
    #[serde(rename = "id_catatan", default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(rename = "NIP", default, deserialize_with = "loose_string")]
    pub employee_ref: String,
    #[serde(rename = "Pangkat_Sekarang", default, deserialize_with = "loose_string")]
    pub current_rank: String,
    #[serde(rename = "Potensi_Pangkat_Baru", default, deserialize_with = "loose_string")]
    pub potential_rank: String,
    #[serde(rename = "Tanggal_Layak", default, deserialize_with = "loose_string")]
    pub eligible_on: String,
    #[serde(rename = "Status", default, deserialize_with = "loose_string")]
    pub status: String,
    #[serde(rename = "Catatan", default, deserialize_with = "loose_string")]
    pub note: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPosition {
    #[serde(rename = "ID_Struktur", default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(rename = "Pegawai", default, deserialize_with = "loose_string")]
    pub employee_ref: String,
    #[serde(rename = "Jabatan", default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(rename = "TMT", default, deserialize_with = "loose_string")]
    pub effective_date: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub parent_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    #[serde(rename = "jenis", default, deserialize_with = "loose_string")]
    pub kind: String,
    #[serde(rename = "aksi", default, deserialize_with = "loose_string")]
    pub action: String,
    #[serde(rename = "waktu", default, deserialize_with = "loose_string")]
    pub at: String,
    #[serde(rename = "keterangan", default, deserialize_with = "loose_string")]
    pub description: String,
}

/// Error body shape: `{"message": ..}` or `{"error": {"message": ..}}`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<NestedError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NestedError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.and_then(|e| e.message))
            .filter(|m| !m.trim().is_empty())
    }
}

/// String, number or bool as text; `null` as empty
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Year as number or numeric string; anything else is unknown
fn loose_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Non-negative amount; negative, fractional or garbage values become zero
fn loose_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
