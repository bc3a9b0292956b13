//! Line protocol spoken with the shell coprocess.
//!
//! Request: `<cword>\t<word0>\t<word1>...` on one line.
//! Response: one candidate per line, terminated by an empty line.

use eyre::{Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::complete::{CompletionEngine, CompletionRequest};
use crate::ports::{CacheStore, VocabularySource};

/// Encode candidates as a response block
pub fn encode_response(candidates: &[String]) -> String {
    let mut response = String::new();
    for candidate in candidates {
        response.push_str(candidate);
        response.push('\n');
    }
    response.push('\n');
    response
}

/// Answer requests until the reader hits EOF; returns the number served
pub async fn serve<V, C, R, W>(engine: &mut CompletionEngine<V, C>, mut reader: R, mut writer: W) -> Result<usize>
where
    V: VocabularySource,
    C: CacheStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Completion session started");
    let mut buf = Vec::new();
    let mut served = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read completion request")?;
        if read == 0 {
            break;
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        // Words may be file names in any encoding
        let line = String::from_utf8_lossy(raw);

        let candidates = match CompletionRequest::from_line(&line) {
            Ok(request) => engine.complete(&request).await,
            Err(e) => {
                debug!("Malformed request {line:?}: {e}");
                Vec::new()
            }
        };

        writer
            .write_all(encode_response(&candidates).as_bytes())
            .await
            .context("Failed to write completion response")?;
        writer.flush().await?;
        served += 1;
    }

    info!("Completion session ended after {served} request(s)");
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MemCache, MockVocabularySource};

    const LINE: &str = "--os-cloud -h cluster-list cluster-show help";

    #[test]
    fn test_encode_response() {
        assert_eq!(encode_response(&[]), "\n");
        assert_eq!(encode_response(&["a".to_string(), "b".to_string()]), "a\nb\n\n");
    }

    #[tokio::test]
    async fn test_serves_each_request_with_one_query() {
        let mut engine = CompletionEngine::new(MockVocabularySource::new(LINE), MemCache::new(&["k8s"]));
        let input = "1\tmagnum\tcluster-\n2\tmagnum\tcluster-list\t\n2\tmagnum\thelp\tcluster-s\n";
        let mut output = Vec::new();

        let served = serve(&mut engine, input.as_bytes(), &mut output).await.unwrap();

        assert_eq!(served, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "cluster-list\ncluster-show\n\n--os-cloud\nk8s\n\ncluster-show\n\n"
        );
        assert_eq!(engine.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_request_gets_empty_response() {
        let mut engine = CompletionEngine::new(MockVocabularySource::new(LINE), MemCache::default());
        let mut output = Vec::new();

        let served = serve(&mut engine, "garbage\n\n1\tmagnum\th\n".as_bytes(), &mut output)
            .await
            .unwrap();

        assert_eq!(served, 3);
        assert_eq!(String::from_utf8(output).unwrap(), "\n\nhelp\n\n");
    }

    #[tokio::test]
    async fn test_non_utf8_request_does_not_end_session() {
        let mut engine = CompletionEngine::new(MockVocabularySource::new(LINE), MemCache::default());
        let input: &[u8] = b"1\tmagnum\tcl\n2\tmagnum\tcluster-list\t\xff\xfe\n1\tmagnum\th\n";
        let mut output = Vec::new();

        let served = serve(&mut engine, input, &mut output).await.unwrap();

        assert_eq!(served, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "cluster-list\ncluster-show\n\n\nhelp\n\n"
        );
        assert_eq!(engine.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_last_request_without_newline_is_served() {
        let mut engine = CompletionEngine::new(MockVocabularySource::new(LINE), MemCache::default());
        let mut output = Vec::new();

        let served = serve(&mut engine, "1\tmagnum\the".as_bytes(), &mut output).await.unwrap();

        assert_eq!(served, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "help\n\n");
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let mut engine = CompletionEngine::new(MockVocabularySource::new(LINE), MemCache::default());
        let mut output = Vec::new();

        let served = serve(&mut engine, "".as_bytes(), &mut output).await.unwrap();

        assert_eq!(served, 0);
        assert!(output.is_empty());
        assert_eq!(engine.source().calls(), 0);
    }
}
