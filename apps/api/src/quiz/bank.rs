//! Question Bank — the ordered, immutable set of quiz questions.
//!
//! Built once at startup and shared read-only through `AppState`.

use std::collections::HashSet;

use serde::Serialize;

use crate::quiz::category::Category;
use crate::quiz::QuizError;

#[derive(Debug, Clone, Serialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub emoji: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// 1-based display number; the engine itself keys answers by 0-based index.
    pub id: u32,
    pub prompt: String,
    pub subtitle: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validates and wraps a question list.
    ///
    /// Rejects an empty bank, questions without options, duplicate option ids
    /// within a question, and options tagged with a reserved category.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidBank("bank has no questions".to_string()));
        }
        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(QuizError::InvalidBank(format!(
                    "question {index} has no options"
                )));
            }
            let mut seen = HashSet::new();
            for option in &question.options {
                if !seen.insert(option.id.as_str()) {
                    return Err(QuizError::InvalidBank(format!(
                        "question {index} repeats option id '{}'",
                        option.id
                    )));
                }
                if option.category.is_reserved() {
                    return Err(QuizError::InvalidBank(format!(
                        "option '{}' uses reserved category '{}'",
                        option.id, option.category
                    )));
                }
            }
        }
        Ok(Self { questions })
    }

    /// The five-question personality quiz shown to students.
    pub fn standard() -> Result<Self, QuizError> {
        use Category::*;

        let questions = vec![
            question(
                1,
                "How do you spend your free Sunday?",
                "Choose what excites you most",
                &[
                    ("build", "Building something with my hands", "🔧", Builder),
                    ("read", "Reading books or solving puzzles", "📚", Analyst),
                    ("create", "Drawing, music, or creative projects", "🎨", Creator),
                    ("help", "Helping family or volunteering", "❤️", Helper),
                ],
            ),
            question(
                2,
                "In group projects, you usually...",
                "Pick your natural role",
                &[
                    ("lead", "Take charge and organize everyone", "👑", Builder),
                    ("research", "Do the research and analysis", "🔍", Analyst),
                    ("design", "Handle presentation and design", "✨", Creator),
                    ("support", "Support others and keep peace", "🤝", Helper),
                ],
            ),
            question(
                3,
                "Your dream job would involve...",
                "What motivates you daily?",
                &[
                    ("impact", "Making a real impact on society", "🌍", Builder),
                    ("solve", "Solving complex problems", "🧩", Analyst),
                    ("express", "Expressing ideas creatively", "🎭", Creator),
                    ("care", "Taking care of people", "🌟", Helper),
                ],
            ),
            question(
                4,
                "When learning something new, you prefer...",
                "What's your learning style?",
                &[
                    ("hands-on", "Hands-on practice and doing", "🛠️", Builder),
                    ("theory", "Understanding theory first", "📖", Analyst),
                    ("visual", "Visual examples and stories", "🎬", Creator),
                    ("discussion", "Group discussions and sharing", "💬", Helper),
                ],
            ),
            question(
                5,
                "Your friends describe you as...",
                "Pick what resonates most",
                &[
                    ("practical", "Practical and determined", "💪", Builder),
                    ("logical", "Logical and detail-oriented", "🎯", Analyst),
                    ("imaginative", "Imaginative and inspiring", "🌈", Creator),
                    ("caring", "Caring and understanding", "🤗", Helper),
                ],
            ),
        ];

        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Looks up the option chosen for `question_index`, or reports which half
    /// of the (index, option) pair is wrong.
    pub fn option(&self, question_index: usize, option_id: &str) -> Result<&QuizOption, QuizError> {
        let question = self
            .get(question_index)
            .ok_or(QuizError::QuestionOutOfRange {
                index: question_index,
                total: self.len(),
            })?;
        question.option(option_id).ok_or_else(|| QuizError::UnknownOption {
            index: question_index,
            option_id: option_id.to_string(),
        })
    }
}

fn question(
    id: u32,
    prompt: &str,
    subtitle: &str,
    options: &[(&str, &str, &str, Category)],
) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        subtitle: subtitle.to_string(),
        options: options
            .iter()
            .map(|(option_id, text, emoji, category)| QuizOption {
                id: option_id.to_string(),
                text: text.to_string(),
                emoji: emoji.to_string(),
                category: *category,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bank_passes_validation() {
        let bank = QuestionBank::standard().unwrap();
        assert_eq!(bank.len(), 5);
        assert_eq!(bank.get(0).unwrap().prompt, "How do you spend your free Sunday?");
    }

    #[test]
    fn test_standard_bank_covers_each_reachable_category_once_per_question() {
        let bank = QuestionBank::standard().unwrap();
        for q in bank.questions() {
            let cats: Vec<Category> = q.options.iter().map(|o| o.category).collect();
            assert_eq!(cats, Category::REACHABLE.to_vec(), "question {}", q.id);
        }
    }

    #[test]
    fn test_standard_bank_never_uses_explorer() {
        let bank = QuestionBank::standard().unwrap();
        assert!(bank
            .questions()
            .iter()
            .flat_map(|q| &q.options)
            .all(|o| o.category != Category::Explorer));
    }

    #[test]
    fn test_empty_bank_rejected() {
        assert!(matches!(
            QuestionBank::new(vec![]),
            Err(QuizError::InvalidBank(_))
        ));
    }

    #[test]
    fn test_duplicate_option_ids_rejected() {
        let q = question(
            1,
            "Q",
            "S",
            &[
                ("a", "one", "1", Category::Builder),
                ("a", "two", "2", Category::Analyst),
            ],
        );
        let err = QuestionBank::new(vec![q]).unwrap_err();
        assert!(err.to_string().contains("repeats option id 'a'"), "{err}");
    }

    #[test]
    fn test_reserved_category_rejected_on_options() {
        let q = question(1, "Q", "S", &[("x", "roam", "🧭", Category::Explorer)]);
        assert!(matches!(
            QuestionBank::new(vec![q]),
            Err(QuizError::InvalidBank(_))
        ));
    }

    #[test]
    fn test_option_lookup_reports_out_of_range_and_unknown() {
        let bank = QuestionBank::standard().unwrap();
        assert_eq!(bank.option(0, "build").unwrap().category, Category::Builder);
        assert!(matches!(
            bank.option(9, "build"),
            Err(QuizError::QuestionOutOfRange { index: 9, total: 5 })
        ));
        // "lead" belongs to question 1, not question 0
        assert!(matches!(
            bank.option(0, "lead"),
            Err(QuizError::UnknownOption { index: 0, .. })
        ));
    }
}
