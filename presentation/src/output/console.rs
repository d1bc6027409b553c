//! Console output formatter for study results

use crate::output::formatter::{OutputFormatter, StudyOutput};
use colored::Colorize;
use serde_json::{Value, json};
use studybuddy_domain::{ConceptGraph, FlashcardDeck, ModelDescriptor, QuizDocument};

/// Formats study results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the result as colored text
    pub fn format(output: &StudyOutput) -> String {
        match output {
            StudyOutput::Reply { reply, .. } => format!("{}\n", reply.trim_end()),
            StudyOutput::Summary { topic, summary } => {
                let mut text = Self::header(&format!("Summary: {}", topic));
                text.push_str("\n\n");
                text.push_str(summary.trim_end());
                text.push('\n');
                text
            }
            StudyOutput::Quiz { topic, quiz } => Self::format_quiz(topic, quiz),
            StudyOutput::Flashcards { topic, deck } => Self::format_flashcards(topic, deck),
            StudyOutput::Map { topic, path, map } => {
                let mut text = Self::header(&format!("Concept Map: {}", topic));
                text.push('\n');
                text.push_str(&Self::format_graph(&map.graph));
                text.push_str(&format!(
                    "\n{} {} ({} bytes, {})\n",
                    "Written to".green().bold(),
                    path.display(),
                    map.image.bytes.len(),
                    map.image.mime_type
                ));
                text
            }
            StudyOutput::Models { models, note } => Self::format_models(models, note.as_deref()),
        }
    }

    /// Format as JSON
    pub fn format_json(output: &StudyOutput) -> String {
        let value = match output {
            StudyOutput::Reply { message, reply } => json!({ "message": message, "reply": reply }),
            StudyOutput::Summary { topic, summary } => {
                json!({ "topic": topic, "summary": summary })
            }
            StudyOutput::Quiz { quiz, .. } => {
                serde_json::to_value(quiz).unwrap_or(Value::Null)
            }
            StudyOutput::Flashcards { deck, .. } => {
                serde_json::to_value(deck).unwrap_or(Value::Null)
            }
            StudyOutput::Map { topic, path, map } => json!({
                "topic": topic,
                "file": path.display().to_string(),
                "graph": serde_json::to_value(&map.graph).unwrap_or(Value::Null),
                "image": map.image.to_data_uri(),
            }),
            StudyOutput::Models { models, note } => json!({
                "models": models
                    .iter()
                    .map(|m| json!({ "rank": m.rank, "identifier": m.identifier }))
                    .collect::<Vec<_>>(),
                "note": note,
            }),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_quiz(topic: &str, quiz: &QuizDocument) -> String {
        let mut output = Self::header(&format!("Quiz: {}", topic));
        output.push('\n');

        for question in &quiz.questions {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("Q{}.", question.id).cyan().bold(),
                question.question
            ));
            for (letter, option) in ('A'..='Z').zip(&question.options) {
                output.push_str(&format!("   {}) {}\n", letter, option));
            }
        }

        output.push_str(&Self::section_header("Answers"));
        for question in &quiz.questions {
            output.push_str(&format!("  {:>2}. {}\n", question.id, question.answer));
        }
        output.push_str(&Self::footer());
        output
    }

    fn format_flashcards(topic: &str, deck: &FlashcardDeck) -> String {
        let mut output = Self::header(&format!("Flashcards: {}", topic));
        output.push('\n');

        for (i, card) in deck.flashcards.iter().enumerate() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── Card {} ──", i + 1).yellow().bold(),
                card.front.bold()
            ));
            output.push_str(&Self::indent(&card.back, "  "));
            output.push('\n');
        }
        output.push_str(&Self::footer());
        output
    }

    fn format_graph(graph: &ConceptGraph) -> String {
        let mut output = format!(
            "{} {}  {} {}\n",
            "Root:".cyan().bold(),
            graph.root,
            "Layout:".cyan().bold(),
            graph.layout.as_str()
        );
        for edge in &graph.edges {
            if edge.relationship.is_empty() {
                output.push_str(&format!("  {} -> {}\n", edge.source, edge.target));
            } else {
                output.push_str(&format!(
                    "  {} -[{}]-> {}\n",
                    edge.source,
                    edge.relationship.dimmed(),
                    edge.target
                ));
            }
        }
        output
    }

    fn format_models(models: &[ModelDescriptor], note: Option<&str>) -> String {
        let mut output = format!("{}\n", "=== Ranked Gemini Models ===".cyan().bold());
        if let Some(note) = note {
            output.push_str(&format!("{} {}\n", "note:".yellow().bold(), note));
        }
        for model in models {
            output.push_str(&format!("  {:>2}. {}\n", model.rank + 1, model.identifier));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &StudyOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &StudyOutput) -> String {
        Self::format_json(output)
    }
}
