pub fn get_readme() -> String {
    String::from(
        "Welcome!

This is a small web server that serves a single page.
You can change the IPv4 address and the port of the server in the config.ini file.
The page itself lives in index.html next to this file; it is read again for every
request, so edits show up without a restart.
",
    )
}
