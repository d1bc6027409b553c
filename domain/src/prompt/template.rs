//! Prompt templates for the study content generators

use crate::study::quiz::QUIZ_LENGTH;
use crate::study::replies::SUMMARY_WORD_LIMIT;

/// Templates for each kind of study artifact
pub struct StudyPromptTemplate;

impl StudyPromptTemplate {
    /// Chat messages go to the providers verbatim
    pub fn chat(message: &str) -> String {
        message.to_string()
    }

    /// Single-paragraph topic summary
    pub fn summary(topic: &str) -> String {
        format!(
            "Provide a comprehensive, continuous, and clear summary of the following topic: '{topic}'. \
             Focus on key concepts, importance, and main details. \
             Keep it under {SUMMARY_WORD_LIMIT} words. Format it as a clean paragraph."
        )
    }

    /// Multiple-choice quiz as raw JSON
    pub fn quiz(topic: &str) -> String {
        format!(
            r#"Generate a {QUIZ_LENGTH}-question multiple choice quiz about: {topic}.
Return ONLY raw JSON in this format:
{{
    "questions": [
        {{
            "id": 1,
            "question": "Question text?",
            "options": ["Unique Option A", "Unique Option B", "Unique Option C", "Unique Option D"],
            "answer": "Correct Option Text"
        }}
    ]
}}
CRITICAL RULES:
1. Provide EXACTLY {QUIZ_LENGTH} questions.
2. Each question MUST have 4 unique options.
3. DO NOT use generic options like "Option A", "Option B".
4. The answer MUST be the exact text of one of the options.
5. Ensure high academic quality and variety."#
        )
    }

    /// Flashcards as raw JSON
    pub fn flashcards(topic: &str) -> String {
        format!(
            r#"Generate 10 flashcards for: {topic}.
Return ONLY raw JSON:
{{
    "flashcards": [
        {{ "front": "Question/Term", "back": "Answer/Definition" }}
    ]
}}"#
        )
    }

    /// Small concrete hierarchy as raw JSON
    pub fn concept_map(topic: &str) -> String {
        format!(
            r#"You are a "Literal Physical Entity" architect.
Task: Generate a hierarchical concept map for: "{topic}".

Respond ONLY with raw JSON in this format:
{{
    "layout": "tree",
    "root": "ROOT_TOPIC",
    "edges": [
        {{ "source": "Parent Node", "target": "Child Node", "relationship": "contains/relates-to" }}
    ]
}}
Limit to 5-8 nodes."#
        )
    }
}
