pub fn get_html() -> String {
    String::from("<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <title>Rust Webserver</title>
</head>
<body>
    <h1>Rust Webserver!</h1>
    <p>This is the default page. Edit the index.html file to change what is served here.</p>
</body>
</html>")
}

/// Served in place of the content file whenever it cannot be read.
pub fn get_fallback_html() -> String {
    String::from("<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <title>File not found</title>
</head>
<body>
    <h1>File not found</h1>
    <p>The index.html file has been deleted or is not available.</p>
</body>
</html>")
}
