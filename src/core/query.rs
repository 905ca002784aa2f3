use crate::domain::model::{Area, Specialty};

/// One search, built from validated selections. Constructed per query and
/// discarded after the text string is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub area: Area,
    pub specialty: Option<Specialty>,
}

impl SearchQuery {
    pub fn new(area: Area, specialty: Option<Specialty>) -> Self {
        Self { area, specialty }
    }

    /// The text sent to the Places search endpoint, e.g.
    /// "cardiologist in Aundh, Pune". Without a specialty the query falls
    /// back to a generic doctor search for the area.
    pub fn text(&self) -> String {
        let term = self
            .specialty
            .map(|sp| sp.query_term())
            .unwrap_or("doctors");
        format!("{} in {}", term, self.area.label())
    }

    /// Value written into the Specialty column: title-cased when the search
    /// was filtered, the empty placeholder when it was not.
    pub fn specialty_label(&self) -> &'static str {
        self.specialty.map(|sp| sp.title()).unwrap_or("")
    }
}
