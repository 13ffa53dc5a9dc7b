use askama::Template;

/// The fixed document served for any unmatched route.
#[derive(Template, Default)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
