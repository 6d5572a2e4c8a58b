use ryg_core::{parse_score, GameDraft, RecordError};

const MAX_FIELD_LEN: usize = 512;

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn insert(&mut self, ch: char) {
        if self.len() >= MAX_FIELD_LEN || ch.is_control() {
            return;
        }
        let idx = self.byte_index();
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Platform,
    Score,
    ImageLink,
    ReferenceLink,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Platform,
        FormField::Score,
        FormField::ImageLink,
        FormField::ReferenceLink,
        FormField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Platform => "Platform",
            FormField::Score => "Score (10-100)",
            FormField::ImageLink => "Image link",
            FormField::ReferenceLink => "Reference link",
            FormField::Notes => "Notes",
        }
    }
}

/// Modal form collecting a new game.
#[derive(Debug, Clone, Default)]
pub struct AddGameForm {
    inputs: [TextInput; 6],
    focus: usize,
}

impl AddGameForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn fields(&self) -> impl Iterator<Item = (FormField, &TextInput)> + '_ {
        FormField::ALL.iter().copied().zip(self.inputs.iter())
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        &mut self.inputs[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    fn text(&self, field: FormField) -> String {
        let idx = FormField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0);
        self.inputs[idx].value().to_string()
    }

    /// Collect the draft, parsing the score text.
    pub fn draft(&self) -> Result<GameDraft, RecordError> {
        let score = parse_score(&self.text(FormField::Score))?;
        Ok(GameDraft {
            title: self.text(FormField::Title),
            platform: self.text(FormField::Platform),
            score,
            image_link: self.text(FormField::ImageLink),
            reference_link: self.text(FormField::ReferenceLink),
            notes: self.text(FormField::Notes),
        })
    }
}
