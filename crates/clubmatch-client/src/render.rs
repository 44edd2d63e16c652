/// Rendering of a decoded backend response into the markup block that
/// replaces the response container.
///
/// Pure string-to-string so the decode path and the display path stay
/// independently testable.
use clubmatch_common::model::RecommendationResponse;

/// Render the response block: heading, labeled status/message paragraphs,
/// and an unordered list of clubs with the score fixed to four decimals.
pub fn render_response(response: &RecommendationResponse) -> String {
    let mut out = String::new();
    out.push_str("<h2>Backend Response</h2>\n");
    out.push_str(&format!(
        "<p><strong>Status:</strong> {}</p>\n",
        response.status
    ));
    out.push_str(&format!(
        "<p><strong>Message:</strong> {}</p>\n",
        response.message
    ));
    out.push_str("<h3>Recommended Clubs</h3>\n");
    out.push_str("<ul>\n");
    for club in &response.clubs {
        out.push_str(&format!(
            "  <li>\n    <strong>{}</strong> (Score: {:.4})\n    <p>{}</p>\n  </li>\n",
            club.name, club.score, club.description
        ));
    }
    out.push_str("</ul>\n");
    out
}
