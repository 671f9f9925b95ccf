use option_tree::view::settings::SettingsHost;

/// Host that answers prompts with a fixed reply and records everything
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub answer: bool,
    pub questions: Vec<String>,
    pub errors: Vec<(String, String)>,
    pub notices: Vec<String>,
}

impl RecordingHost {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

impl SettingsHost for RecordingHost {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }

    fn report_error(&mut self, message: &str, detail: &str) {
        self.errors.push((message.to_string(), detail.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
