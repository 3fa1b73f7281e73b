use std::io::Read;
use std::{env, fs, io, process};

use core::InterpretResult;
use vm::Vm;

fn main() {
  env_logger::init();

  let args = env::args().collect::<Vec<String>>();

  let source = match args.as_slice() {
    [_] => read_stdin(),
    [_, path] => read_file(path),
    _ => {
      eprintln!("Usage: wisp [path]");
      process::exit(64);
    }
  };

  let mut vm = Vm::new();
  let result = vm.interpret(&source);

  process::exit(exit_code(result));
}

fn read_file(path: &str) -> String {
  match fs::read_to_string(path) {
    Ok(source) => source,
    Err(error) => {
      match error.kind() {
        io::ErrorKind::NotFound => eprintln!("File '{}' not found.", path),
        io::ErrorKind::PermissionDenied => eprintln!("Need permission to open '{}'.", path),
        _ => eprintln!("Unexpected error when opening '{}': {}.", path, error),
      }
      process::exit(74);
    }
  }
}

fn read_stdin() -> String {
  let mut source = String::new();
  if let Err(error) = io::stdin().read_to_string(&mut source) {
    eprintln!("Unexpected error reading stdin: {}.", error);
    process::exit(74);
  }
  source
}

/// Maps an `InterpretResult` to the classic `sysexits.h` convention
/// (`EX_DATAERR` for a bad input, `EX_SOFTWARE` for a failure while
/// running it).
fn exit_code(result: InterpretResult) -> i32 {
  match result {
    InterpretResult::Ok => 0,
    InterpretResult::CompileError => 65,
    InterpretResult::RuntimeError => 70,
  }
}
