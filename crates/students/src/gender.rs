use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

const NAMES: [(&str, Gender); 2] = [("Male", Gender::Male), ("Female", Gender::Female)];

impl Gender {
    /// Case-insensitive lookup; surrounding whitespace is ignored and blank
    /// text is `None`.
    pub fn parse(text: &str) -> Option<Gender> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|(_, gender)| *gender)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl core::fmt::Display for Gender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
