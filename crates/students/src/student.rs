use serde::{Deserialize, Serialize};

use recordkeep_core::Record;

use crate::gender::Gender;

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 20;
const GENDER_WIDTH: usize = 10;
const SCORE_WIDTH: usize = 10;
const GRADE_WIDTH: usize = 5;

/// Lower score bound of each letter, best first. Anything below is `F`.
const GRADE_BANDS: [(f64, char); 5] = [
    (90.0, 'A'),
    (80.0, 'B'),
    (70.0, 'C'),
    (60.0, 'D'),
    (50.0, 'E'),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: Option<String>,
    /// `None` until a recognised gender is supplied.
    pub gender: Option<Gender>,
    pub score: f64,
}

impl Student {
    /// Build a student, parsing `gender` as free text. Unrecognised text
    /// leaves the gender unset.
    pub fn new(id: i32, name: impl Into<String>, gender: &str, score: f64) -> Self {
        Self {
            id,
            name: Some(name.into()),
            gender: Gender::parse(gender),
            score,
        }
    }

    /// Letter grade for `score`. Depends only on the argument.
    pub fn grade(score: f64) -> char {
        GRADE_BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map_or('F', |(_, letter)| *letter)
    }

    /// Letter grade for this student's own score.
    pub fn letter_grade(&self) -> char {
        Self::grade(self.score)
    }
}

impl Record for Student {
    fn id(&self) -> i32 {
        self.id
    }

    fn header() -> String {
        format!(
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<GENDER_WIDTH$} {:>SCORE_WIDTH$} {:>GRADE_WIDTH$}",
            "ID", "Name", "Gender", "Score", "Grade"
        )
    }

    fn info(&self) -> String {
        format!(
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<GENDER_WIDTH$} {:>SCORE_WIDTH$.2} {:>GRADE_WIDTH$}",
            self.id,
            self.name.as_deref().unwrap_or_default(),
            self.gender.map(|g| g.as_str()).unwrap_or_default(),
            self.score,
            self.letter_grade(),
        )
    }
}

impl core::fmt::Display for Student {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.info())
    }
}
