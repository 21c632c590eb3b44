//! Student store.

use std::path::Path;

use tracing::debug;

use recordkeep_core::validate::{self, is_in_range, is_non_blank, is_non_empty, is_valid_id};
use recordkeep_core::{
    FlatFileFormat, IngestError, IngestReport, LineError, RecordError, RecordResult, ingest_file,
    Record, parse_field, require,
};
use recordkeep_events::{ObserverId, Observers, StoreEvent};

use crate::gender::Gender;
use crate::student::Student;

/// id, name, gender, score.
const RECORD_FIELDS: usize = 4;
const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// Partial update for [`StudentList::update`]. `None` leaves a field as is.
///
/// `gender` is free text, parsed the same way as in [`Student::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub score: Option<f64>,
}

impl StudentPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Ordered in-memory student roster.
#[derive(Debug, Default)]
pub struct StudentList {
    students: Vec<Student>,
    observers: Observers<StudentList, Student>,
    format: FlatFileFormat,
}

impl StudentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose flat files separate the four fields with `delimiter`
    /// instead of `/`.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            format: FlatFileFormat {
                delimiter,
                fields: RECORD_FIELDS,
            },
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn subscribe<F>(&mut self, kind: StoreEvent, handler: F) -> ObserverId
    where
        F: Fn(&StudentList, &Student) + 'static,
    {
        self.observers.subscribe(kind, handler)
    }

    pub fn subscribe_all<F>(&mut self, handler: F) -> ObserverId
    where
        F: Fn(StoreEvent, &StudentList, &Student) + 'static,
    {
        self.observers.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn create(&mut self, student: Option<Student>) -> bool {
        let Some(student) = student else {
            debug!("create rejected: no student given");
            return false;
        };

        if let Err(err) = Self::validate(&student) {
            debug!(id = student.id, %err, "create rejected");
            return false;
        }

        debug!(id = student.id, "student created");
        self.students.push(student);
        if let Some(created) = self.students.last() {
            self.observers.notify(StoreEvent::Created, self, created);
        }
        true
    }

    pub fn add(&mut self, student: Student) -> bool {
        self.create(Some(student))
    }

    /// Notify `Read` observers about `student` without touching the roster.
    pub fn read(&self, student: Option<&Student>) -> bool {
        let Some(student) = student else {
            return false;
        };
        self.observers.notify(StoreEvent::Read, self, student);
        true
    }

    /// Apply every present and valid field of `patch` to the first student
    /// with `id`.
    ///
    /// Returns `true` whenever the student exists, but only notifies
    /// `Updated` if some field actually changed.
    pub fn update(&mut self, id: i32, patch: StudentPatch) -> bool {
        let index = match self.locate(id) {
            Ok(index) => index,
            Err(err) => {
                debug!(%err, "update rejected");
                return false;
            }
        };

        let student = &mut self.students[index];
        let mut changed = false;

        if let Some(name) = patch.name.filter(|n| is_non_empty(Some(n.as_str()))) {
            student.name = Some(name);
            changed = true;
        }
        if let Some(text) = patch.gender.as_deref().filter(|t| is_non_blank(Some(*t))) {
            match Gender::parse(text) {
                Some(gender) => {
                    student.gender = Some(gender);
                    changed = true;
                }
                None => debug!(id, gender = text, "ignoring unknown gender"),
            }
        }
        if let Some(score) = patch.score.filter(|s| is_in_range(*s, MIN_SCORE, MAX_SCORE)) {
            student.score = score;
            changed = true;
        }

        if changed {
            let student = &self.students[index];
            self.observers.notify(StoreEvent::Updated, self, student);
        } else {
            debug!(id, "update changed nothing");
        }
        true
    }

    /// Remove the first student with `id`.
    pub fn delete(&mut self, id: i32) -> bool {
        let index = match self.locate(id) {
            Ok(index) => index,
            Err(err) => {
                debug!(%err, "delete rejected");
                return false;
            }
        };

        match self.remove_at(index) {
            Some(removed) => {
                debug!(id, "student deleted");
                self.observers.notify(StoreEvent::Deleted, self, &removed);
                true
            }
            None => false,
        }
    }

    /// Load students from a flat file, returning `false` only when the file
    /// does not exist.
    pub fn initialize(&mut self, path: impl AsRef<Path>) -> bool {
        self.ingest(path).is_ok()
    }

    pub fn ingest(&mut self, path: impl AsRef<Path>) -> Result<IngestReport, IngestError> {
        let format = self.format;
        ingest_file(path, &format, |_, fields| self.ingest_line(fields))
    }

    // Field order: id, name, gender, score.
    fn ingest_line(&mut self, fields: &[&str]) -> Result<(), LineError> {
        let (raw_id, name, gender, raw_score) = match fields {
            [id, name, gender, score] => (*id, *name, *gender, *score),
            _ => {
                return Err(LineError::MissingData {
                    expected: RECORD_FIELDS,
                    found: fields.len(),
                });
            }
        };

        let id: i32 = parse_field(raw_id, "id")?;
        require(is_valid_id(id), "id", raw_id)?;

        require(is_non_empty(Some(name)), "name", name)?;
        require(is_non_blank(Some(gender)), "gender", gender)?;

        let score: f64 = parse_field(raw_score, "score")?;
        require(is_in_range(score, MIN_SCORE, MAX_SCORE), "score", raw_score)?;

        if self.create(Some(Student::new(id, name, gender, score))) {
            Ok(())
        } else {
            Err(LineError::Rejected)
        }
    }

    fn locate(&self, id: i32) -> RecordResult<usize> {
        self.students
            .iter()
            .position(|s| s.id() == id)
            .ok_or(RecordError::not_found(id))
    }

    fn remove_at(&mut self, index: usize) -> Option<Student> {
        (index < self.students.len()).then(|| self.students.remove(index))
    }

    fn validate(student: &Student) -> RecordResult<()> {
        validate::check_id(student.id)?;
        validate::check(is_non_empty(student.name.as_deref()), "name")?;
        validate::check(student.gender.is_some(), "gender")?;
        validate::check(is_in_range(student.score, MIN_SCORE, MAX_SCORE), "score")?;
        Ok(())
    }
}
