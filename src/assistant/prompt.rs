use crate::models::{AssistantTurn, Report, Speaker, YesNo};

pub const ASSISTANT_SYSTEM_PROMPT: &str = r#"You are an AI Health Assistant. Your role is to answer follow-up questions about a patient's health report.
You must base your answers STRICTLY on the health data and initial suggestions provided with each question.
DO NOT provide new medical advice, diagnoses, or any information beyond what can be inferred from the provided context.
If a question goes beyond the scope of the report (for example a diagnosis or medication advice), politely decline and advise the user to consult a human doctor.
Keep your answers concise and easy to understand.
Always end your response with this sentence: "Remember, I am an AI assistant. Please consult a healthcare professional for medical advice.""#;

fn speaker_label(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "User",
        Speaker::Assistant => "AI Assistant",
    }
}

/// Build the per-question prompt: record, suggestions, predictions (if any),
/// the prior conversation and the new question.
pub fn build_assistant_prompt(report: &Report, history: &[AssistantTurn], question: &str) -> String {
    let r = &report.record;
    let mut prompt = String::new();

    prompt.push_str("**Patient's Original Health Data:**\n");
    prompt.push_str(&format!("- Age: {}\n", r.age));
    prompt.push_str(&format!("- Gender: {}\n", r.gender));
    prompt.push_str(&format!("- BMI: {}\n", r.bmi));
    prompt.push_str(&format!("- Systolic Blood Pressure: {} mmHg\n", r.systolic));
    prompt.push_str(&format!("- Diastolic Blood Pressure: {} mmHg\n", r.diastolic));
    prompt.push_str(&format!("- Cholesterol: {} mg/dL\n", r.cholesterol));
    prompt.push_str(&format!("- Blood Glucose Level: {} mg/dL\n", r.glucose));
    prompt.push_str(&format!("- Smoker: {}\n", YesNo::from(r.smoking)));
    prompt.push_str(&format!("- Alcohol Consumption: {}\n", YesNo::from(r.alcohol)));
    prompt.push_str(&format!("- Activity Level (days/week): {}\n", r.activity_days));
    prompt.push_str(&format!(
        "- Family History of Heart Disease: {}\n\n",
        YesNo::from(r.family_history)
    ));

    prompt.push_str("**Initial Suggestions:**\n\"\"\"\n");
    prompt.push_str(report.outcome.suggestions().unwrap_or_default());
    prompt.push_str("\n\"\"\"\n\n");

    let predictions = report.outcome.predictions();
    if !predictions.is_empty() {
        prompt.push_str("**Condition Predictions:**\n");
        for p in predictions {
            prompt.push_str(&format!("- {}\n", p.summary_line()));
        }
        prompt.push('\n');
    }

    prompt.push_str("**Conversation History:**\n");
    for turn in history {
        prompt.push_str(&format!("{}: {}\n", speaker_label(turn.speaker), turn.text));
    }
    prompt.push('\n');

    prompt.push_str("**User's New Question:**\n");
    prompt.push_str(&format!("User: {question}\n\n"));
    prompt.push_str("AI Assistant:");

    prompt
}
