//! TOML question bank parser.
//!
//! Loads banks from TOML files and directories, enforces the structural
//! invariants grading depends on, and reports softer content issues as
//! warnings.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Locale, Localized, LocalizedQuestion, Question, QuestionBank, Topic};

/// The PHP course bank compiled into the binary.
const BUILTIN_BANK: &str = include_str!("../banks/php-course.toml");

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    topics: Vec<TomlTopic>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    id: String,
    #[serde(default)]
    title: TomlTitle,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlTitle {
    #[serde(default)]
    en: Option<String>,
    #[serde(default)]
    ar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    en: Option<TomlLocalizedQuestion>,
    #[serde(default)]
    ar: Option<TomlLocalizedQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlLocalizedQuestion {
    text: String,
    options: Vec<String>,
    answer: usize,
}

impl From<TomlLocalizedQuestion> for LocalizedQuestion {
    fn from(q: TomlLocalizedQuestion) -> Self {
        LocalizedQuestion {
            text: q.text,
            options: q.options,
            answer: q.answer,
        }
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut seen_ids = HashSet::new();
    let topics = parsed
        .topics
        .into_iter()
        .map(|t| {
            anyhow::ensure!(
                seen_ids.insert(t.id.clone()),
                "duplicate topic id: {}",
                t.id
            );
            build_topic(t)
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid bank: {}", source_path.display()))?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        topics,
    })
}

fn build_topic(t: TomlTopic) -> Result<Topic> {
    anyhow::ensure!(!t.questions.is_empty(), "topic {} has no questions", t.id);

    let en_title = t.title.en.unwrap_or_else(|| t.id.clone());
    let ar_title = t.title.ar.unwrap_or_else(|| en_title.clone());

    let questions = t
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            build_question(q).with_context(|| format!("topic {} question {}", t.id, i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Topic {
        id: t.id,
        title: Localized {
            en: en_title,
            ar: ar_title,
        },
        questions,
    })
}

fn build_question(q: TomlQuestion) -> Result<Question> {
    let en: LocalizedQuestion = q
        .en
        .context("missing `en` translation")?
        .into();
    let ar: LocalizedQuestion = q
        .ar
        .context("missing `ar` translation")?
        .into();

    for (locale, lq) in [(Locale::En, &en), (Locale::Ar, &ar)] {
        anyhow::ensure!(
            lq.options.len() >= 2,
            "`{locale}` has {} option(s), at least 2 required",
            lq.options.len()
        );
        anyhow::ensure!(
            lq.answer < lq.options.len(),
            "`{locale}` answer {} is out of range ({} options)",
            lq.answer,
            lq.options.len()
        );
    }

    // Answer order must not change between translations.
    anyhow::ensure!(
        en.answer == ar.answer,
        "answer index differs between locales (en = {}, ar = {})",
        en.answer,
        ar.answer
    );
    anyhow::ensure!(
        en.options.len() == ar.options.len(),
        "option count differs between locales (en = {}, ar = {})",
        en.options.len(),
        ar.options.len()
    );

    Ok(Question {
        translations: Localized { en, ar },
    })
}

/// The bank shipped with the crate.
pub fn builtin_bank() -> Result<QuestionBank> {
    parse_bank_str(BUILTIN_BANK, Path::new("<builtin>/php-course.toml"))
}

/// Recursively load all `.toml` bank files from a directory.
///
/// Any file that fails to parse or breaks a structural invariant fails the
/// whole load.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            banks.push(parse_bank(&path)?);
        }
    }

    Ok(banks)
}

/// Load a bank from a file, or merge every bank found under a directory.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let banks = load_bank_directory(path)?;
    anyhow::ensure!(!banks.is_empty(), "no bank files in {}", path.display());
    merge_banks(banks)
}

/// Concatenate the topics of several banks. The first bank names the result.
pub fn merge_banks(banks: Vec<QuestionBank>) -> Result<QuestionBank> {
    let mut iter = banks.into_iter();
    let Some(mut merged) = iter.next() else {
        anyhow::bail!("no banks to merge");
    };

    let mut seen: HashSet<String> = merged.topics.iter().map(|t| t.id.clone()).collect();
    for bank in iter {
        for topic in bank.topics {
            anyhow::ensure!(
                seen.insert(topic.id.clone()),
                "duplicate topic id {} (also defined in bank {})",
                topic.id,
                bank.id
            );
            merged.topics.push(topic);
        }
    }

    Ok(merged)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic id (if applicable).
    pub topic_id: Option<String>,
    /// 1-based question ordinal (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for content issues that do not break grading.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for topic in &bank.topics {
        for (locale, title) in topic.title.iter() {
            if title.trim().is_empty() {
                warnings.push(ValidationWarning {
                    topic_id: Some(topic.id.clone()),
                    question: None,
                    message: format!("`{locale}` title is empty"),
                });
            }
        }

        for (i, question) in topic.questions.iter().enumerate() {
            for (locale, lq) in question.translations.iter() {
                if lq.text.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        topic_id: Some(topic.id.clone()),
                        question: Some(i + 1),
                        message: format!("`{locale}` question text is empty"),
                    });
                }

                let mut seen = HashSet::new();
                for option in &lq.options {
                    if !seen.insert(option.trim()) {
                        warnings.push(ValidationWarning {
                            topic_id: Some(topic.id.clone()),
                            question: Some(i + 1),
                            message: format!("`{locale}` has duplicate option: {option}"),
                        });
                    }
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "test-bank"
name = "Test Bank"

[[topics]]
id = "quiz-basics"
title = { en = "Basics", ar = "أساسيات" }

[[topics.questions]]
en = { text = "Which symbol starts a variable in PHP?", options = ["&", "%", "$"], answer = 2 }
ar = { text = "أي رمز يبدأ به المتغير في PHP؟", options = ["&", "%", "$"], answer = 2 }

[[topics.questions]]
en = { text = "How do you check a condition in PHP?", options = ["if", "check", "verify"], answer = 0 }
ar = { text = "كيف تتحقق من شرط في PHP؟", options = ["if", "check", "verify"], answer = 0 }
"#;

    fn path() -> PathBuf {
        PathBuf::from("test.toml")
    }

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &path()).unwrap();
        assert_eq!(bank.id, "test-bank");
        assert_eq!(bank.topics.len(), 1);
        let topic = &bank.topics[0];
        assert_eq!(topic.id, "quiz-basics");
        assert_eq!(topic.title(Locale::Ar), "أساسيات");
        assert_eq!(topic.questions.len(), 2);
        assert_eq!(topic.questions[0].correct_index(), 2);
    }

    #[test]
    fn missing_titles_fall_back() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-untitled"

[[topics.questions]]
en = { text = "Q", options = ["a", "b"], answer = 0 }
ar = { text = "س", options = ["أ", "ب"], answer = 0 }
"#;
        let bank = parse_bank_str(toml, &path()).unwrap();
        assert_eq!(bank.topics[0].title(Locale::En), "quiz-untitled");
        assert_eq!(bank.topics[0].title(Locale::Ar), "quiz-untitled");
    }

    #[test]
    fn reject_answer_mismatch_between_locales() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-x"

[[topics.questions]]
en = { text = "Q", options = ["a", "b", "c"], answer = 1 }
ar = { text = "س", options = ["أ", "ب", "ج"], answer = 2 }
"#;
        let err = parse_bank_str(toml, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("answer index differs"));
    }

    #[test]
    fn reject_missing_translation() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-x"

[[topics.questions]]
en = { text = "Q", options = ["a", "b"], answer = 1 }
"#;
        let err = parse_bank_str(toml, &path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("missing `ar` translation"), "{msg}");
        assert!(msg.contains("quiz-x question 1"), "{msg}");
    }

    #[test]
    fn reject_single_option_and_out_of_range_answer() {
        let single = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-x"

[[topics.questions]]
en = { text = "Q", options = ["a"], answer = 0 }
ar = { text = "س", options = ["أ"], answer = 0 }
"#;
        let err = parse_bank_str(single, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("at least 2 required"));

        let out_of_range = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-x"

[[topics.questions]]
en = { text = "Q", options = ["a", "b"], answer = 2 }
ar = { text = "س", options = ["أ", "ب"], answer = 2 }
"#;
        let err = parse_bank_str(out_of_range, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[test]
    fn reject_duplicate_topic_ids_and_empty_topics() {
        let dupes = format!(
            "{VALID_TOML}\n{}",
            r#"
[[topics]]
id = "quiz-basics"

[[topics.questions]]
en = { text = "Q", options = ["a", "b"], answer = 0 }
ar = { text = "س", options = ["أ", "ب"], answer = 0 }
"#
        );
        let err = parse_bank_str(&dupes, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate topic id"));

        let empty = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-empty"
"#;
        let err = parse_bank_str(empty, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("has no questions"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn builtin_bank_is_valid() {
        let bank = builtin_bank().unwrap();
        assert!(bank.topic("quiz-basics").is_some());
        assert!(validate_bank(&bank).is_empty());
        for topic in &bank.topics {
            for q in &topic.questions {
                assert_eq!(q.localized(Locale::En).answer, q.localized(Locale::Ar).answer);
            }
        }
    }

    #[test]
    fn validate_reports_duplicate_options() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[topics]]
id = "quiz-x"
title = { en = "X", ar = "س" }

[[topics.questions]]
en = { text = "Q", options = ["same", "same"], answer = 0 }
ar = { text = "س", options = ["أ", "ب"], answer = 0 }
"#;
        let bank = parse_bank_str(toml, &path()).unwrap();
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].question, Some(1));
        assert!(warnings[0].message.contains("duplicate option"));
    }

    #[test]
    fn load_directory_merges_banks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            r#"
[bank]
id = "second"
name = "Second"

[[topics]]
id = "quiz-loops"

[[topics.questions]]
en = { text = "Which loop runs at least once?", options = ["for", "do-while"], answer = 1 }
ar = { text = "أي حلقة تنفذ مرة واحدة على الأقل؟", options = ["for", "do-while"], answer = 1 }
"#,
        )
        .unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 2);

        let merged = load_bank(dir.path()).unwrap();
        assert_eq!(merged.id, "test-bank");
        assert_eq!(
            merged.topic_ids().collect::<Vec<_>>(),
            vec!["quiz-basics", "quiz-loops"]
        );
    }

    #[test]
    fn load_directory_fails_on_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            r#"
[bank]
id = "mismatch"
name = "Mismatch"

[[topics]]
id = "quiz-arrays"

[[topics.questions]]
en = { text = "Which function counts array elements?", options = ["count", "size"], answer = 0 }
ar = { text = "أي دالة تعد عناصر المصفوفة؟", options = ["count", "size"], answer = 1 }
"#,
        )
        .unwrap();

        let err = load_bank_directory(dir.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("b.toml"), "{msg}");
        assert!(msg.contains("answer index"), "{msg}");
        assert!(load_bank(dir.path()).is_err());

        std::fs::write(dir.path().join("b.toml"), "not [toml").unwrap();
        assert!(load_bank_directory(dir.path()).is_err());
    }

    #[test]
    fn merge_rejects_duplicate_topics_across_banks() {
        let a = parse_bank_str(VALID_TOML, &path()).unwrap();
        let b = a.clone();
        assert!(merge_banks(vec![a, b]).is_err());
    }
}
