use std::{
    fs,
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    path::PathBuf,
    process::{Command, Output},
    thread::{self, JoinHandle},
};

const TOKEN_ENV: &str = "HUBVIEW_E2E_TOKEN";

fn hubview_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hubview"))
}

/// Answer exactly one HTTP request with a canned response; yields the raw request.
fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/graphql", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line
                .to_ascii_lowercase()
                .strip_prefix("content-length:")
            {
                content_length = value.trim().parse().unwrap();
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request + &String::from_utf8(body).unwrap()
    });
    (url, handle)
}

fn unused_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{port}/graphql")
}

struct TestEnv {
    tmp: tempfile::TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    fn new(endpoint: &str) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                "default_path = \"acme/widgets\"\n\n[github]\nendpoint = \"{endpoint}\"\ntoken_env = \"{TOKEN_ENV}\"\n"
            ),
        )
        .unwrap();
        Self { tmp, config_path }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(hubview_binary())
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("XDG_CACHE_HOME", self.tmp.path().join("cache"))
            .env(TOKEN_ENV, "e2e-secret")
            .output()
            .unwrap()
    }
}

const ORG_BODY: &str = r#"{"data":{"organization":{"name":"Acme","url":"https://github.com/acme","repository":{"name":"widgets","url":"https://github.com/acme/widgets","issues":{"edges":[{"node":{"id":"I_1","title":"Gears grind","url":"https://github.com/acme/widgets/issues/1"}},{"node":{"id":"I_2","title":"Sprockets slip","url":"https://github.com/acme/widgets/issues/2"}}]}}}}}"#;

#[test]
fn test_fetch_prints_organization_and_issues() {
    let (url, server) = serve_once("200 OK", ORG_BODY);
    let env = TestEnv::new(&url);

    let output = env.run(&["fetch"]);
    let request = server.join().unwrap();

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Issues from Organization: Acme https://github.com/acme\n\
         In Repository: widgets https://github.com/acme/widgets\n  \
         - Gears grind https://github.com/acme/widgets/issues/1\n  \
         - Sprockets slip https://github.com/acme/widgets/issues/2\n"
    );
    assert!(
        request
            .to_ascii_lowercase()
            .contains("authorization: bearer e2e-secret")
    );
    assert!(request.contains(r#""variables":{"organization":"acme","repository":"widgets"}"#));
}

#[test]
fn test_fetch_path_argument_overrides_default() {
    let (url, server) = serve_once("200 OK", ORG_BODY);
    let env = TestEnv::new(&url);

    let output = env.run(&["fetch", "orgA/repoA"]);
    let request = server.join().unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(request.contains(r#""variables":{"organization":"orgA","repository":"repoA"}"#));
}

#[test]
fn test_fetch_json_with_graphql_errors_exits_one() {
    let (url, server) = serve_once(
        "401 Unauthorized",
        r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/graphql"}"#,
    );
    let env = TestEnv::new(&url);

    let output = env.run(&["fetch", "--json"]);
    server.join().unwrap();

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["organization"], serde_json::Value::Null);
    assert_eq!(value["errors"][0]["message"], "Bad credentials");
}

#[test]
fn test_fetch_plain_graphql_errors() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"data":{"organization":null},"errors":[{"message":"Could not resolve to an Organization"},{"message":"with the login of 'nope'."}]}"#,
    );
    let env = TestEnv::new(&url);

    let output = env.run(&["fetch", "nope/nothing"]);
    server.join().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Something went wrong:Could not resolve to an Organization with the login of 'nope'.\n"
    );
}

#[test]
fn test_fetch_transport_failure_exits_two() {
    let env = TestEnv::new(&unused_url());

    let output = env.run(&["fetch", "--json"]);

    assert_eq!(output.status.code(), Some(2), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let value: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert!(value["error"].as_str().unwrap().contains("request to"));
}

#[test]
fn test_endpoint_flag_overrides_config() {
    let (url, server) = serve_once("200 OK", ORG_BODY);
    let env = TestEnv::new(&unused_url());

    let output = env.run(&["--endpoint", &url, "fetch"]);
    server.join().unwrap();

    assert!(output.status.success(), "{output:?}");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(hubview_binary())
        .args(["--config"])
        .arg(tmp.path().join("absent.toml"))
        .args(["fetch"])
        .env("XDG_CACHE_HOME", tmp.path().join("cache"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_invalid_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, "unknown_field = true\n").unwrap();

    let output = Command::new(hubview_binary())
        .arg("--config")
        .arg(&config_path)
        .args(["fetch", "--json"])
        .env("XDG_CACHE_HOME", tmp.path().join("cache"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error\""), "got: {stderr}");
}
