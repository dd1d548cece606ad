//! Manual smoke test: shows a blocking dialog, then an asynchronous one
//! with the result posted back through this thread's message queue.

#[cfg(windows)]
fn main() {
    use std::ptr;
    use std::sync::mpsc;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, MSG, TranslateMessage,
    };

    use msgboxrs::{MessageBoxKind, MessageBoxRequest, show, show_async};

    let request = MessageBoxRequest::new(MessageBoxKind::Warning)
        .title("msgboxrs demo")
        .message("Proceed with the demo?")
        .detail("The chosen button index is printed to the console.")
        .buttons(["Proceed", "Cancel"])
        .cancel_index(1);

    let picked = show(None, &request);
    println!("sync result: {picked}");

    let (done_tx, done_rx) = mpsc::channel();
    let async_request = MessageBoxRequest::new(MessageBoxKind::Information)
        .title("msgboxrs demo")
        .message("This one runs off the main thread.")
        .buttons(["Got it"]);
    show_async(None, async_request, move |result| {
        println!("async result: {result}");
        let _ = done_tx.send(());
    });

    // Pump messages until the callback has been delivered.
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while done_rx.try_recv().is_err() && GetMessageW(&mut msg, ptr::null_mut(), 0, 0) > 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(windows))]
fn main() {
    eprintln!("msgboxrs demo is Windows-only");
}
