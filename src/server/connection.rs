use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use crate::api::{self, AppState, Response};
use crate::error::{AppResult, CommandError};
use crate::server::codec::{CommandCodec, Frame};

/// Serves one client until it disconnects
///
/// Commands are newline-delimited and each line, blank or not, gets exactly
/// one response line. A line longer than `max_line_length` is answered with
/// an error and skipped; the connection stays open. Only an I/O failure ends
/// the session early.
pub async fn handle_connection<S>(
    stream: S,
    state: AppState,
    max_line_length: usize,
) -> AppResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut frames = Framed::new(stream, CommandCodec::new(max_line_length));

    while let Some(frame) = frames.next().await {
        let response = match frame? {
            Frame::Command(line) => api::route(&state, &line).await,
            Frame::TooLong => {
                tracing::warn!(max_line_length, "Rejected over-long command");
                Response::Error(CommandError::TooLong)
            }
        };

        frames.send(response.to_string()).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserId, VideoId};
    use tokio::io::{AsyncWriteExt, DuplexStream};
    use tokio::task::JoinHandle;
    use tokio_util::codec::LinesCodec;

    const MAX_LINE: usize = 64;

    fn connect(state: &AppState) -> (Framed<DuplexStream, LinesCodec>, JoinHandle<AppResult<()>>) {
        let (client, server) = tokio::io::duplex(1024);
        let handle = tokio::spawn(handle_connection(server, state.clone(), MAX_LINE));
        (Framed::new(client, LinesCodec::new()), handle)
    }

    async fn request(client: &mut Framed<DuplexStream, LinesCodec>, line: &str) -> String {
        client.send(line).await.unwrap();
        client.next().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_connection_serves_commands_until_close() {
        let state = AppState::default();
        let (mut client, handle) = connect(&state);

        assert_eq!(
            request(&mut client, "WATCH u1 A").await,
            "WATCH_UPDATED, Recommendations: []"
        );
        assert_eq!(
            request(&mut client, "WATCH u1 B").await,
            r#"WATCH_UPDATED, Recommendations: ["A"]"#
        );
        assert_eq!(request(&mut client, "RECOMMEND_FOR_VIDEO B").await, r#"["A"]"#);
        assert_eq!(request(&mut client, "PING").await, "ERROR: Unrecognized command");

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_watch_changes_nothing() {
        let state = AppState::default();
        let (mut client, _handle) = connect(&state);

        assert_eq!(
            request(&mut client, "WATCH").await,
            "ERROR: Invalid WATCH command format"
        );
        assert_eq!(
            request(&mut client, "RECOMMEND_FOR_VIDEO").await,
            "ERROR: Invalid RECOMMEND_FOR_VIDEO command format"
        );
        assert_eq!(state.store.popularity(&VideoId::from("WATCH")).await, 0);
    }

    #[tokio::test]
    async fn test_two_commands_in_one_write() {
        let state = AppState::default();
        let (mut client, _handle) = connect(&state);

        client
            .get_mut()
            .write_all(b"WATCH u1 A\r\nWATCH u1 B\n")
            .await
            .unwrap();

        assert_eq!(
            client.next().await.unwrap().unwrap(),
            "WATCH_UPDATED, Recommendations: []"
        );
        assert_eq!(
            client.next().await.unwrap().unwrap(),
            r#"WATCH_UPDATED, Recommendations: ["A"]"#
        );
    }

    #[tokio::test]
    async fn test_command_split_across_writes() {
        let state = AppState::default();
        let (mut client, _handle) = connect(&state);

        client.get_mut().write_all(b"RECOMMEND_FOR").await.unwrap();
        client.get_mut().flush().await.unwrap();
        tokio::task::yield_now().await;
        client.get_mut().write_all(b"_VIDEO zzz\n").await.unwrap();

        assert_eq!(client.next().await.unwrap().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_blank_lines_are_answered_as_unrecognized() {
        let state = AppState::default();
        let (mut client, _handle) = connect(&state);

        client.get_mut().write_all(b"\n   \nPING\n").await.unwrap();

        for _ in 0..3 {
            assert_eq!(
                client.next().await.unwrap().unwrap(),
                "ERROR: Unrecognized command"
            );
        }
    }

    #[tokio::test]
    async fn test_over_long_line_is_rejected_and_connection_stays_open() {
        let state = AppState::default();
        let (mut client, handle) = connect(&state);

        let line = format!("WATCH {} A\n", "u".repeat(MAX_LINE * 2));
        client.get_mut().write_all(line.as_bytes()).await.unwrap();

        assert_eq!(
            client.next().await.unwrap().unwrap(),
            "ERROR: Command exceeds maximum length"
        );
        assert_eq!(request(&mut client, "RECOMMEND_FOR_VIDEO A").await, "[]");
        assert_eq!(state.store.popularity(&VideoId::from("A")).await, 0);

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_non_utf8_bytes_do_not_end_the_session() {
        let state = AppState::default();
        let (mut client, handle) = connect(&state);

        client
            .get_mut()
            .write_all(b"WATCH u1 vid\xff\nRECOMMEND_FOR_VIDEO x\n")
            .await
            .unwrap();

        assert_eq!(
            client.next().await.unwrap().unwrap(),
            "WATCH_UPDATED, Recommendations: []"
        );
        assert_eq!(client.next().await.unwrap().unwrap(), "[]");
        assert_eq!(state.store.watch_set_len(&UserId::from("u1")).await, 1);

        drop(client);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let stream = tokio_test::io::Builder::new()
            .read(b"RECOMMEND_FOR_VIDEO zzz\n")
            .write(b"[]\n")
            .read(b"WATCH\n")
            .write(b"ERROR: Invalid WATCH command format\n")
            .build();

        handle_connection(stream, AppState::default(), MAX_LINE)
            .await
            .unwrap();
    }
}
