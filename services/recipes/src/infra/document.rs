use crate::domain::repository::DocumentRenderer;
use crate::domain::types::RenderedDocument;
use crate::error::RecipesServiceError;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_cart.txt";
pub const SHOPPING_LIST_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Renders the title, a blank line, then one line per entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn render(
        &self,
        title: &str,
        lines: &[String],
    ) -> Result<RenderedDocument, RecipesServiceError> {
        let mut body = String::with_capacity(
            title.len() + 2 + lines.iter().map(|l| l.len() + 1).sum::<usize>(),
        );
        body.push_str(title);
        body.push_str("\n\n");
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        Ok(RenderedDocument {
            filename: SHOPPING_LIST_FILENAME.to_owned(),
            content_type: SHOPPING_LIST_CONTENT_TYPE.to_owned(),
            bytes: body.into_bytes(),
        })
    }
}
