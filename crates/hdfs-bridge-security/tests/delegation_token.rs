//! HDFS delegation token presence checks.

use hdfs_bridge_security::{
    AmbientSecurityContext, Credentials, HDFS_DELEGATION_TOKEN_KIND, SecurityError, Token,
    has_hdfs_delegation_token,
};
use hdfs_bridge_test_utils::{StubSecurityContext, env_map};
use pretty_assertions::assert_eq;
use std::fs::File;
use tempfile::TempDir;

fn token(kind: &str) -> Token {
    Token::new(vec![7; 4], vec![9; 4], kind, "ha-hdfs:nameservice1")
}

#[test]
fn empty_collection_has_no_token() {
    let context = StubSecurityContext::user("alice", Credentials::new());
    assert!(!has_hdfs_delegation_token(&context).expect("check"));
}

#[test]
fn matching_kind_is_found_among_others() {
    let mut credentials = Credentials::new();
    credentials.add_token("rm", token("RM_DELEGATION_TOKEN"));
    credentials.add_token("hdfs", token(HDFS_DELEGATION_TOKEN_KIND));
    let context = StubSecurityContext::user("alice", credentials);
    assert!(has_hdfs_delegation_token(&context).expect("check"));
}

#[test]
fn other_kinds_do_not_match() {
    let mut credentials = Credentials::new();
    credentials.add_token("rm", token("RM_DELEGATION_TOKEN"));
    credentials.add_token("lower", token("hdfs_delegation_token"));
    let context = StubSecurityContext::user("alice", credentials);
    assert!(!has_hdfs_delegation_token(&context).expect("check"));
}

#[test]
fn missing_user_is_propagated() {
    let context = StubSecurityContext::no_user();
    let err = has_hdfs_delegation_token(&context).unwrap_err();
    assert!(matches!(err, SecurityError::NoCurrentUser));
}

#[test]
fn ambient_context_without_user_name_fails() {
    let context = AmbientSecurityContext::with_env(env_map(&[]));
    assert!(matches!(
        has_hdfs_delegation_token(&context).unwrap_err(),
        SecurityError::NoCurrentUser
    ));
}

#[test]
fn ambient_context_reads_token_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("container_tokens");
    let mut credentials = Credentials::new();
    credentials.add_token("hdfs", token(HDFS_DELEGATION_TOKEN_KIND));
    let mut file = File::create(&path).expect("create");
    credentials.write_token_storage(&mut file).expect("write");
    drop(file);

    let context = AmbientSecurityContext::with_env(env_map(&[
        ("HADOOP_USER_NAME", "flink"),
        ("USER", "ignored"),
        ("HADOOP_TOKEN_FILE_LOCATION", path.to_str().expect("utf8")),
    ]));
    assert!(has_hdfs_delegation_token(&context).expect("check"));

    let user = hdfs_bridge_security::SecurityContext::current_user(&context).expect("user");
    assert_eq!(user.name(), "flink");
    assert_eq!(user.credentials(), &credentials);
}

#[test]
fn ambient_context_without_token_file_has_no_token() {
    let context = AmbientSecurityContext::with_env(env_map(&[("USER", "bob")]));
    assert!(!has_hdfs_delegation_token(&context).expect("check"));
}

#[test]
fn unreadable_token_file_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("absent");
    let context = AmbientSecurityContext::with_env(env_map(&[
        ("USER", "bob"),
        ("HADOOP_TOKEN_FILE_LOCATION", missing.to_str().expect("utf8")),
    ]));
    assert!(matches!(
        has_hdfs_delegation_token(&context).unwrap_err(),
        SecurityError::TokenFile { .. }
    ));
}
