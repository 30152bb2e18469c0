use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PlayerName,
    PlayerCity,
    Phone,
    PlayedIn,
    PlayerType,
    LastPlayedFor,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::PlayerName,
        Field::PlayerCity,
        Field::Phone,
        Field::PlayedIn,
        Field::PlayerType,
        Field::LastPlayedFor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::PlayerName => "Player Name",
            Field::PlayerCity => "Player City",
            Field::Phone => "Phone",
            Field::PlayedIn => "Played In",
            Field::PlayerType => "Player Type",
            Field::LastPlayedFor => "Last Played For",
        }
    }

    pub fn is_select(self) -> bool {
        matches!(
            self,
            Field::PlayedIn | Field::PlayerType | Field::LastPlayedFor
        )
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            Field::PlayedIn => PlayedIn::LABELS,
            Field::PlayerType => PlayerType::LABELS,
            Field::LastPlayedFor => Team::LABELS,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayedIn {
    Domestic,
    International,
    National,
}

impl PlayedIn {
    pub const LABELS: &'static [&'static str] = &["Domestic", "International", "National"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Domestic" => Some(Self::Domestic),
            "International" => Some(Self::International),
            "National" => Some(Self::National),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::International => "International",
            Self::National => "National",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    Batsman,
    Bowler,
    #[serde(rename = "All-Rounder")]
    AllRounder,
    #[serde(rename = "Wicket-keeper")]
    WicketKeeper,
}

impl PlayerType {
    pub const LABELS: &'static [&'static str] =
        &["Batsman", "Bowler", "All-Rounder", "Wicket-keeper"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Batsman" => Some(Self::Batsman),
            "Bowler" => Some(Self::Bowler),
            "All-Rounder" => Some(Self::AllRounder),
            "Wicket-keeper" => Some(Self::WicketKeeper),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Batsman => "Batsman",
            Self::Bowler => "Bowler",
            Self::AllRounder => "All-Rounder",
            Self::WicketKeeper => "Wicket-keeper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "Team A")]
    A,
    #[serde(rename = "Team B")]
    B,
    #[serde(rename = "Team C")]
    C,
    #[serde(rename = "Team D")]
    D,
    #[serde(rename = "Team E")]
    E,
    #[serde(rename = "Team F")]
    F,
}

impl Team {
    pub const LABELS: &'static [&'static str] =
        &["Team A", "Team B", "Team C", "Team D", "Team E", "Team F"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Team A" => Some(Self::A),
            "Team B" => Some(Self::B),
            "Team C" => Some(Self::C),
            "Team D" => Some(Self::D),
            "Team E" => Some(Self::E),
            "Team F" => Some(Self::F),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "Team A",
            Self::B => "Team B",
            Self::C => "Team C",
            Self::D => "Team D",
            Self::E => "Team E",
            Self::F => "Team F",
        }
    }
}

/// Raw form state as typed by the user, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub player_name: String,
    pub player_city: String,
    pub phone: String,
    pub played_in: String,
    pub player_type: String,
    pub last_played_for: String,
}

impl FormValues {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::PlayerName => &self.player_name,
            Field::PlayerCity => &self.player_city,
            Field::Phone => &self.phone,
            Field::PlayedIn => &self.played_in,
            Field::PlayerType => &self.player_type,
            Field::LastPlayedFor => &self.last_played_for,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::PlayerName => &mut self.player_name,
            Field::PlayerCity => &mut self.player_city,
            Field::Phone => &mut self.phone,
            Field::PlayedIn => &mut self.played_in,
            Field::PlayerType => &mut self.player_type,
            Field::LastPlayedFor => &mut self.last_played_for,
        }
    }

    /// Trimmed payload, or None while any selection is missing or unknown.
    pub fn to_record(&self) -> Option<PlayerRecord> {
        Some(PlayerRecord {
            player_name: self.player_name.trim().to_string(),
            player_city: self.player_city.trim().to_string(),
            phone: self.phone.trim().to_string(),
            played_in: PlayedIn::from_label(self.played_in.trim())?,
            player_type: PlayerType::from_label(self.player_type.trim())?,
            last_played_for: Team::from_label(self.last_played_for.trim())?,
        })
    }
}

/// Registration payload as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub player_name: String,
    pub player_city: String,
    pub phone: String,
    pub played_in: PlayedIn,
    pub player_type: PlayerType,
    pub last_played_for: Team,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub id: Option<u32>,
    pub player_name: String,
    pub player_city: String,
    pub phone: String,
    pub played_in: String,
    pub player_type: String,
    pub last_played_for: String,
}

impl RosterRow {
    /// Display key: server id when present, else the positional index.
    pub fn display_key(&self, index: usize) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => format!("p-{index}"),
        }
    }
}

pub fn roster_row_from_value(value: &Value) -> RosterRow {
    RosterRow {
        id: pick_u32(value, &["playerId", "id"]),
        player_name: pick_string(value, &["playerName", "name"]).unwrap_or_else(placeholder),
        player_city: pick_string(value, &["playerCity", "city"]).unwrap_or_else(placeholder),
        phone: pick_string(value, &["phone"]).unwrap_or_else(placeholder),
        played_in: pick_string(value, &["playedIn"]).unwrap_or_else(placeholder),
        player_type: pick_string(value, &["playerType"]).unwrap_or_else(placeholder),
        last_played_for: pick_string(value, &["lastPlayedFor"]).unwrap_or_else(placeholder),
    }
}

fn placeholder() -> String {
    "-".to_string()
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num as u32);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.parse::<u32>() {
                    return Some(num);
                }
            }
        }
    }
    None
}
