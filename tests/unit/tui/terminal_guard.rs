use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct Recorder {
    log: Mutex<Vec<&'static str>>,
}

impl Recorder {
    fn log(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}

impl ScreenMode for Recorder {
    fn enter(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("enter");
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("leave");
        Ok(())
    }
}

#[test]
fn dropping_the_guard_leaves_the_mode() {
    let mode = Arc::new(Recorder::default());
    drop(TerminalGuard::with_mode(mode.clone()).unwrap());
    assert_eq!(mode.log(), ["enter", "leave"]);
}

#[test]
fn explicit_restore_then_drop_leaves_once() {
    let mode = Arc::new(Recorder::default());
    let guard = TerminalGuard::with_mode(mode.clone()).unwrap();
    let handle = guard.handle();
    assert!(!handle.is_restored());

    handle.restore().unwrap();
    handle.restore().unwrap();
    assert!(handle.is_restored());
    drop(guard);

    assert_eq!(mode.log(), ["enter", "leave"]);
}

#[test]
fn failing_to_enter_yields_no_guard() {
    struct NoTty;
    impl ScreenMode for NoTty {
        fn enter(&self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no tty"))
        }
        fn leave(&self) -> io::Result<()> {
            panic!("left a mode that was never entered");
        }
    }
    assert!(TerminalGuard::with_mode(Arc::new(NoTty)).is_err());
}

#[test]
fn exit_codes_follow_shell_convention() {
    assert_eq!(TerminationSignal::Interrupt.exit_code(), 130);
    assert_eq!(TerminationSignal::Terminate.exit_code(), 143);
}

#[cfg(unix)]
#[test]
fn only_interrupt_and_terminate_are_recognised() {
    assert_eq!(TerminationSignal::from_raw(2), Some(TerminationSignal::Interrupt));
    assert_eq!(TerminationSignal::from_raw(15), Some(TerminationSignal::Terminate));
    assert_eq!(TerminationSignal::from_raw(1), None);
}
