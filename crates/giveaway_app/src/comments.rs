/// Every combination of text, punctuation and smiley, in a fixed order:
/// `"{text}{punct} {smiley}"` for each smiley, then `"{text}{punct}"`, and
/// finally the bare text.
pub fn build_comments(
    texts: &[String],
    punctuation: &[String],
    smileys: &[String],
) -> Vec<String> {
    let per_text = punctuation.len() * (smileys.len() + 1) + 1;
    let mut comments = Vec::with_capacity(texts.len() * per_text);
    for text in texts {
        for punct in punctuation {
            for smiley in smileys {
                comments.push(format!("{text}{punct} {smiley}"));
            }
            comments.push(format!("{text}{punct}"));
        }
        comments.push(text.clone());
    }
    comments
}
