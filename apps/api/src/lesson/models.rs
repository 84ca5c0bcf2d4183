use serde::{Deserialize, Serialize};

pub use crate::code_check::models::Language as LiveCodingLanguage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub step: u32,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
}

/// A four-option multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: [String; 4],
    /// Always within `0..=3`.
    pub correct_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionData {
    pub question: Question,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockData {
    pub language: String,
    pub code: String,
    pub editable: bool,
    pub runnable: bool,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankData {
    pub code: String,
    pub blanks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedBugfixData {
    pub code: String,
    pub time_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicesData {
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCodingTask {
    pub title: String,
    pub description: String,
    pub languages: Vec<LiveCodingLanguage>,
    pub acceptance_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugfixTask {
    pub title: String,
    pub buggy_code: String,
    pub fix_description: String,
    pub language: LiveCodingLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskData<T> {
    pub task: T,
}

/// One interactive widget extracted from a tutor message.
///
/// Serializes as `{ "type": "...", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    CodeBlock(CodeBlockData),
    TestQuestion(QuestionData),
    MiniTest(QuestionData),
    FillBlank(FillBlankData),
    TimedBugfix(TimedBugfixData),
    Choices(ChoicesData),
    CreateLivecoding(TaskData<LiveCodingTask>),
    CreateBugfix(TaskData<BugfixTask>),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::CodeBlock(_) => "code_block",
            Action::TestQuestion(_) => "test_question",
            Action::MiniTest(_) => "mini_test",
            Action::FillBlank(_) => "fill_blank",
            Action::TimedBugfix(_) => "timed_bugfix",
            Action::Choices(_) => "choices",
            Action::CreateLivecoding(_) => "create_livecoding",
            Action::CreateBugfix(_) => "create_bugfix",
        }
    }
}

/// Everything extracted from one tutor message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLessonActions {
    /// The message with consumed directives and filler phrases removed.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    pub is_completed: bool,
    pub images: Vec<String>,
    pub actions: Vec<Action>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_serializes_as_type_and_data() {
        let action = Action::CodeBlock(CodeBlockData {
            language: "python".to_string(),
            code: "print(1)".to_string(),
            editable: true,
            runnable: false,
            readonly: false,
        });
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "code_block");
        assert_eq!(value["data"]["code"], "print(1)");
        assert_eq!(action.kind(), "code_block");
    }

    #[test]
    fn test_question_serializes_camel_case_with_type() {
        let action = Action::MiniTest(QuestionData {
            question: Question {
                text: "2+2?".to_string(),
                kind: QuestionType::MultipleChoice,
                options: ["3", "4", "5", "6"].map(String::from),
                correct_index: 1,
            },
        });
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "mini_test",
                "data": {
                    "question": {
                        "text": "2+2?",
                        "type": "multiple_choice",
                        "options": ["3", "4", "5", "6"],
                        "correctIndex": 1
                    }
                }
            })
        );
    }

    #[test]
    fn test_parsed_actions_omit_absent_roadmap_and_progress() {
        let value = serde_json::to_value(ParsedLessonActions::default()).unwrap();
        assert!(value.get("roadmap").is_none());
        assert!(value.get("progress").is_none());
        assert_eq!(value["isCompleted"], false);
    }

    #[test]
    fn test_progress_status_snake_case() {
        let p = Progress {
            step: 2,
            status: StepStatus::InProgress,
        };
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            json!({"step": 2, "status": "in_progress"})
        );
    }

    #[test]
    fn test_bugfix_task_roundtrips_from_json() {
        let json = r#"{"type":"create_bugfix","data":{"task":{"title":"T","buggyCode":"x","fixDescription":"y","language":"java"}}}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        match action {
            Action::CreateBugfix(TaskData { task }) => {
                assert_eq!(task.language, LiveCodingLanguage::Java);
                assert_eq!(task.fix_description, "y");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
