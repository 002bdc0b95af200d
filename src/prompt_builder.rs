use crate::context::FileContext;

pub fn build_prompt(prompt: &str, context: Option<&FileContext>) -> String {
    let Some(context) = context.filter(|c| !c.is_empty()) else {
        return prompt.to_string();
    };

    let mut message = String::from("Context:\n");
    for file in &context.files {
        message.push_str(&format!(
            "File: {}\nLanguage: {}\nContent:\n```\n{}\n```\n\n",
            file.path.display(),
            file.language,
            file.content
        ));
    }
    message.push_str("Request: ");
    message.push_str(prompt);
    message
}
