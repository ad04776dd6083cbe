//! Prompt construction for the Ollama backend.

/// Prompt for drafting a new plan from a task description.
pub fn draft(task: &str) -> String {
    format!(
        "You are a planning assistant for coding tasks. The user will give you a task.\n\
         Generate a short, clear plan with only 3-5 steps on how to best achieve the project.\n\
         Do not add irrelevant setup steps. Be concise.\n\
         \n\
         Task: {task}"
    )
}

/// Prompt for revising an existing plan per a free-text instruction.
///
/// Current steps are numbered `1.`, `2.`, … so the model sees the same shape
/// the parser strips back out.
pub fn revise(task: &str, steps: &[String], instruction: &str) -> String {
    let numbered = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a planning assistant. The user has an existing plan and wants to modify it.\n\
         \n\
         Original Task: {task}\n\
         Original Plan:\n\
         {numbered}\n\
         \n\
         User's modification request: {instruction}\n\
         \n\
         Please provide an updated plan based on the user's request. Keep it 3-5 steps and be concise.\n\
         Respond with the updated task title and plan steps."
    )
}
