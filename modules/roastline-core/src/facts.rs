use tracing::warn;

use brightdata_client::ProfileRecord;

use crate::traits::FactModel;

/// Facts per profile. The output contract is exactly this many, always.
pub const FACT_COUNT: usize = 3;

/// Sampling temperature for fact generation. Biased high so the model
/// commits to jokes instead of summarizing the profile.
pub const FACT_TEMPERATURE: f32 = 0.8;

/// Filler for missing slots when the model under-produces.
pub(crate) const UNDERPRODUCE_FILLER: &str =
    "This person is so interesting, even AI needs more time to process their awesomeness!";

/// Full fallback set when generation fails outright.
pub(crate) const FALLBACK_FACTS: [&str; FACT_COUNT] = [
    "This person is so mysterious, even AI can't figure them out!",
    "Their LinkedIn profile broke our comedy algorithm!",
    "Apparently they're too funny for artificial intelligence!",
];

/// Build the generation instruction for one profile. Embeds the full
/// record payload and the numbered-list output contract.
pub fn build_fact_prompt(record: &ProfileRecord) -> String {
    let profile_text = serde_json::to_string_pretty(record).unwrap_or_default();

    format!(
        "Based on the following LinkedIn profile information, generate exactly 3 funny, \
         witty, and entertaining facts about this person.\n\
         Make them humorous but respectful - the kind of facts that would make an audience \
         laugh and be amazed.\n\
         Think like a comedian doing a roast but in a friendly way.\n\n\
         Profile Information:\n{profile_text}\n\n\
         Generate 3 funny facts in this exact format:\n\
         1. [First funny fact]\n\
         2. [Second funny fact]\n\
         3. [Third funny fact]\n\n\
         Make sure each fact is:\n\
         - Genuinely funny and engaging\n\
         - Based on their profile information\n\
         - Appropriate for a professional audience\n\
         - Would get laughs from a crowd"
    )
}

/// Extract numbered facts from a free-form model reply. Pure: the same
/// text always yields the same facts, in order of appearance. At most
/// one fact per line; the first matching marker wins.
pub fn parse_facts(reply: &str) -> Vec<String> {
    reply
        .lines()
        .filter_map(|line| extract_fact(line.trim()))
        .collect()
}

/// Match a line against the accepted markers for facts 1..=3: the plain
/// `n.` form, the role-prefixed `assistant: n.` form, and the bold
/// `**n.**` form.
fn extract_fact(line: &str) -> Option<String> {
    for n in 1..=FACT_COUNT {
        for marker in [
            format!("{n}."),
            format!("assistant: {n}."),
            format!("**{n}.**"),
        ] {
            if let Some(rest) = line.strip_prefix(&marker) {
                return Some(strip_wrapping(rest.trim()));
            }
        }
    }
    None
}

/// Strip `**bold**` and then `"quoted"` wrappers when they enclose the
/// whole remaining text.
fn strip_wrapping(fact: &str) -> String {
    let mut fact = fact.trim();
    if fact.len() >= 4 && fact.starts_with("**") && fact.ends_with("**") {
        fact = fact[2..fact.len() - 2].trim();
    }
    if fact.len() >= 2 && fact.starts_with('"') && fact.ends_with('"') {
        fact = fact[1..fact.len() - 1].trim();
    }
    fact.to_string()
}

/// Pad or truncate to exactly [`FACT_COUNT`] entries, preserving order.
pub fn pad_facts(mut facts: Vec<String>) -> Vec<String> {
    facts.truncate(FACT_COUNT);
    while facts.len() < FACT_COUNT {
        facts.push(UNDERPRODUCE_FILLER.to_string());
    }
    facts
}

/// Generate exactly [`FACT_COUNT`] facts for one record. Generation or
/// parsing trouble degrades to the fixed fallback set rather than
/// propagating, so one bad record cannot abort the batch.
pub async fn generate_facts<M: FactModel + ?Sized>(
    model: &M,
    record: &ProfileRecord,
) -> Vec<String> {
    let prompt = build_fact_prompt(record);

    match model.chat(&prompt, FACT_TEMPERATURE).await {
        Ok(reply) => pad_facts(parse_facts(&reply)),
        Err(err) => {
            warn!(
                name = record.name.as_deref().unwrap_or("unknown"),
                error = %err,
                "Fact generation failed, using fallback facts"
            );
            FALLBACK_FACTS.iter().map(|s| s.to_string()).collect()
        }
    }
}
