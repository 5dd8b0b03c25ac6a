//! 단말 에뮬레이터 - 한 줄 입력이 한 턴

use parish_core::DataStore;
use parish_foundation::{keys, Localizer, User};
use parish_ussd::UssdService;
use std::io::{self, BufRead, Write};

/// 입력이 끝날 때까지 USSD 세션 반복
///
/// 세션이 끝나면 시작 안내를 다시 보여주고 다음 다이얼을 기다린다.
pub fn run<R, W>(
    service: &UssdService,
    user: &User,
    store: &mut dyn DataStore,
    i18n: &dyn Localizer,
    input: R,
    mut out: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let start_prompt = i18n.translate(
        keys::START_PROMPT,
        &[("code", service.settings().start_code.as_str())],
    );
    writeln!(out, "{}", start_prompt)?;

    for line in input.lines() {
        let line = line?;
        let response = service.process_request(&line, user, store, i18n);

        writeln!(out, "\n{}", response.display)?;
        if response.session_ended {
            writeln!(out, "\n{}", start_prompt)?;
        }
        out.flush()?;
    }

    // 입력 종료 = 단말 해제
    service.end_session(user);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parish_core::MemoryStore;
    use parish_foundation::Catalog;
    use std::io::Cursor;

    fn session_output(user_id: &str, lines: &str) -> (String, UssdService, MemoryStore) {
        let mut store = MemoryStore::sample();
        let user = store.user(user_id).cloned().unwrap();
        let catalog = Catalog::english();
        let service = UssdService::default();

        let mut out = Vec::new();
        run(
            &service,
            &user,
            &mut store,
            &catalog,
            Cursor::new(lines.to_string()),
            &mut out,
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), service, store)
    }

    #[test]
    fn test_prompt_shown_again_after_session_ends() {
        let (out, service, _) = session_output("U_APV", "*123#\n00\n");

        assert!(out.contains("Leader menu"));
        assert!(out.contains("Operation cancelled."));
        assert_eq!(out.matches("Dial *123# to start.").count(), 2);
        assert_eq!(service.active_sessions(), 0);
    }

    #[test]
    fn test_end_of_input_releases_session() {
        let (out, service, _) = session_output("U_BELIEVER", "*123#\n");

        assert!(out.contains("My account"));
        assert_eq!(service.active_sessions(), 0);
    }

    #[test]
    fn test_input_before_dial_is_prompted() {
        let (out, _, _) = session_output("U_HOF", "1\n");
        assert_eq!(out.matches("Dial *123# to start.").count(), 2);
    }
}
