//! Landing page

use axum::response::Html;

const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Cafe &amp; Wifi API</title>
</head>
<body>
    <h1>Cafe &amp; Wifi API</h1>
    <p>A directory of remote-work friendly cafes.</p>
    <ul>
        <li><code>GET /all</code> — every cafe</li>
        <li><code>GET /random</code> — one cafe, chosen at random</li>
        <li><code>GET /search?location=&lt;name&gt;</code> — cafes at a location</li>
        <li><code>POST /add</code> — add a cafe (form-encoded)</li>
        <li><code>PATCH /update-price/&lt;id&gt;?new_price=&lt;price&gt;</code> — update a coffee price</li>
        <li><code>DELETE /report-closed/&lt;id&gt;?api_key=&lt;key&gt;</code> — report a cafe as closed</li>
    </ul>
</body>
</html>
"#;

pub async fn home() -> Html<&'static str> {
    Html(INDEX)
}
