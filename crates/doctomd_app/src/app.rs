use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use doctomd_core::{update, AppState, Effect, Msg};

use crate::effects::EffectRunner;
use crate::input::{self, UserCommand};
use crate::logging::{self, LogDestination};
use crate::render;

pub fn run() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx);

    // One-shot capability probe before the first prompt.
    runner.run(vec![Effect::ProbeCapability]);

    let command_rx = spawn_input_thread();

    let mut state = AppState::new();
    println!("{}", render::render(&state.view()));
    print_prompt();

    loop {
        // Engine and timer messages first, then user commands.
        while let Ok(msg) = msg_rx.try_recv() {
            state = dispatch(state, msg, &runner);
        }

        match command_rx.try_recv() {
            Ok(UserCommand::Quit) => break,
            Ok(command) => {
                if let Some(msg) = handle_command(command) {
                    state = dispatch(state, msg, &runner);
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        if state.consume_dirty() {
            println!("{}", render::render(&state.view()));
            print_prompt();
        }
        thread::sleep(Duration::from_millis(20));
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn handle_command(command: UserCommand) -> Option<Msg> {
    match command {
        UserCommand::Add(paths) => {
            let (candidates, unreadable) = input::candidates_from_paths(&paths);
            for problem in unreadable {
                println!("{}", render::notice(&problem));
            }
            Some(Msg::FilesPicked(candidates))
        }
        UserCommand::Remove(index) => Some(Msg::RemoveClicked { index }),
        UserCommand::Clear => Some(Msg::ClearClicked),
        UserCommand::Convert => Some(Msg::ConvertClicked),
        UserCommand::Download(index) => Some(Msg::DownloadFileClicked { index }),
        UserCommand::DownloadAll => Some(Msg::DownloadAllClicked),
        UserCommand::New => Some(Msg::ResetClicked),
        UserCommand::Help => {
            print_help();
            None
        }
        UserCommand::Unknown(line) => {
            println!("Unknown command: {line} (try 'help')");
            None
        }
        UserCommand::Quit => None,
    }
}

fn spawn_input_thread() -> mpsc::Receiver<UserCommand> {
    let (command_tx, command_rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(command) = input::parse_command(&line) {
                if command_tx.send(command).is_err() {
                    break;
                }
            }
        }
    });
    command_rx
}

fn print_prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("add <path>...   queue .doc/.docx files for conversion");
    println!("rm <n>          remove the n-th queued file");
    println!("clear           empty the queue");
    println!("convert         upload the queue for conversion");
    println!("download all    save the finished batch as a zip");
    println!("download <n>    save the n-th converted file");
    println!("new             start over after results or an error");
    println!("quit            exit");
}
