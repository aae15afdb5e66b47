/// Kind of a host input field. Only text inputs can carry a picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
    Checkbox,
    Label,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputField {
    pub id: String,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
    pub placeholder: String,
    pub title: String,
    pub invalid: bool,
}

impl InputField {
    pub fn new(id: &str, label: &str, kind: InputKind) -> Self {
        InputField {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            placeholder: String::new(),
            title: String::new(),
            invalid: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Native date inputs are swapped for plain text once a picker owns them.
    pub fn is_text_like(&self) -> bool {
        matches!(self.kind, InputKind::Text | InputKind::Date)
    }
}

/// The host document: an ordered set of input fields addressable by id.
#[derive(Clone, Debug, Default)]
pub struct Form {
    fields: Vec<InputField>,
}

impl Form {
    pub fn new(fields: Vec<InputField>) -> Self {
        Form { fields }
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    /// Resolves `#id` or a bare id.
    pub fn select(&self, selector: &str) -> Option<&InputField> {
        let id = selector.trim().trim_start_matches('#');
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(vec![
            InputField::new("start", "Start", InputKind::Text).with_value("15/03/2024"),
            InputField::new("agree", "Agree", InputKind::Checkbox),
        ])
    }

    #[test]
    fn test_select_by_hash_or_bare_id() {
        let f = form();
        assert_eq!(f.select("#start").unwrap().value, "15/03/2024");
        assert_eq!(f.select("start").unwrap().id, "start");
        assert!(f.select("#missing").is_none());
    }

    #[test]
    fn test_text_like_kinds() {
        let f = form();
        assert!(f.get("start").unwrap().is_text_like());
        assert!(!f.get("agree").unwrap().is_text_like());
        assert!(InputField::new("d", "D", InputKind::Date).is_text_like());
    }

    #[test]
    fn test_get_mut_edits_value() {
        let mut f = form();
        f.get_mut("start").unwrap().value.push('x');
        assert_eq!(f.get("start").unwrap().value, "15/03/2024x");
    }
}
