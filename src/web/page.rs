//! Landing page served at `/`

use std::path::Path;

/// Render the status page.
///
/// Both interpolated values come from the server itself, not from requests.
pub fn render_index(upload_count: usize, upload_dir: &Path, port: u16) -> String {
    format!(
        r#"<html>
<head><title>MyCyanGlasses Test Backend</title></head>
<body style="font-family: Arial; padding: 40px; max-width: 800px; margin: 0 auto;">
    <h1>MyCyanGlasses Test Backend</h1>
    <p>Backend is running and ready to receive photos!</p>

    <h2>Status</h2>
    <ul>
        <li><strong>Upload Endpoint:</strong> POST /upload</li>
        <li><strong>Photos Received:</strong> {count}</li>
        <li><strong>Storage Location:</strong> {dir}</li>
    </ul>

    <h2>How to Use</h2>
    <ol>
        <li>Get your computer's IP address (run <code>hostname -I</code> on Linux)</li>
        <li>In the app Settings, set endpoint to: <code>http://YOUR_IP:{port}/upload</code></li>
        <li>Make sure your phone and computer are on the same network</li>
        <li>Take photos with the glasses - they'll be saved to {folder}/</li>
    </ol>

    <h2>Quick Test</h2>
    <p>Test the connection from your app using the Test Connection button</p>
</body>
</html>
"#,
        count = upload_count,
        dir = upload_dir.display(),
        port = port,
        folder = upload_dir
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
    )
}
