/// Closing instruction of every prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Return only valid JSON.";

/// Builds the instruction sent to the model for `text`.
///
/// The text is embedded verbatim, twice: quoted in the request and as the
/// `word` value of the answer template. No escaping happens here; the request
/// body is serialized by `serde_json`, which takes care of quotes, newlines
/// and non-ASCII text.
pub fn build_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_OVERHEAD + text.len() * 2);

    prompt.push_str(
        "Provide Translation the word or sentence(Check which one is it word or sentence) '",
    );
    prompt.push_str(text);
    prompt.push_str("' in the following JSON format:\n");
    prompt.push_str("{\n");
    prompt.push_str("  \"type\": \"word\",\n");
    prompt.push_str("  \"word\": \"");
    prompt.push_str(text);
    prompt.push_str("\",\n");
    prompt.push_str("  \"definition\": \"[clear definition]\",\n");
    prompt.push_str("  \"examples\": [\"[example 1]\", \"[example 2]\"],\n");
    prompt.push_str("  \"pronunciation\": \"[IPA pronunciation if available]\",\n");
    prompt.push_str("  \"persian_definition\": \"[Persian translation]\",\n");
    prompt.push_str("  \"synonyms\": [\"[synonym 1]\", \"[synonym 2]\"],\n");
    prompt.push_str("  \"acronym\": \"[full form if acronym, otherwise empty]\"\n");
    prompt.push_str("}\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);

    prompt
}

const PROMPT_OVERHEAD: usize = 512;
