use std::io::Write;

use loxfront::{
    config::{DriverConfig, Emit},
    Driver, LoxfrontError,
};
use tempfile::NamedTempFile;

//--------------------------------------------------------------------------------------------------
// Function: Helpers
//--------------------------------------------------------------------------------------------------

fn script(source: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(source.as_bytes())?;
    file.flush()?;
    Ok(file)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test_log::test(tokio::test)]
async fn test_run_file_prints_the_program() -> anyhow::Result<()> {
    let file = script("var a = 1;\nwhile (a < 3) a = a + 1;\n")?;
    let driver = Driver::default();

    let output = driver.run_file(file.path()).await?;
    assert_eq!(output, "var a = 1;\nwhile ((a < 3)) (a = (a + 1));");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_run_file_collects_all_errors() -> anyhow::Result<()> {
    let file = script("var a = @;\nprint ;\n")?;
    let driver = Driver::default();

    let error = driver.run_file(file.path()).await.unwrap_err();
    let diagnostics = error.diagnostics().unwrap();
    assert_eq!(diagnostics.lex.len(), 1);
    assert_eq!(diagnostics.parse.len(), 2);
    assert_eq!(
        error.to_string(),
        "[line 1] Error: Unexpected character '@'.\n\
         [line 1] Error at ';': Expect expression.\n\
         [line 2] Error at ';': Expect expression."
    );

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_run_file_emits_tokens() -> anyhow::Result<()> {
    let file = script("print 1.5;")?;
    let config = DriverConfig::builder().emit(Emit::Tokens).build();
    let driver = Driver::new(config);

    let output = driver.run_file(file.path()).await?;
    assert_eq!(output, "Print print nil\nNumber 1.5 1.5\nSemicolon ; nil\nEof  nil");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_run_file_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let driver = Driver::default();

    let result = driver.run_file(dir.path().join("missing.lox")).await;
    assert!(matches!(result, Err(LoxfrontError::Io(_))));
}

#[test_log::test(tokio::test)]
async fn test_config_file_drives_the_prompt() -> anyhow::Result<()> {
    let file = script("prompt = \"lox> \"\nemit = \"tokens\"\n")?;
    let config = DriverConfig::load(Some(file.path())).await?;
    let driver = Driver::new(config);

    let input: &[u8] = b"nil\n";
    let mut output = Vec::new();
    driver
        .run_prompt(input, &mut output, |error| panic!("unexpected error: {error}"))
        .await?;

    assert_eq!(
        String::from_utf8(output)?,
        "lox> Nil nil nil\nEof  nil\nlox> "
    );

    Ok(())
}
