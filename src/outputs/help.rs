/// The command listing shown by `help`.
pub fn help_text(assistant_name: &str) -> String {
    format!(
        "\n🛠️ {}'s Command List:
  weather <city>         - Get the weather report
  wikipedia <topic>      - Quick summary from Wikipedia
  ai <question>          - Ask me anything!
  news                   - Latest tech news
  note <text>            - Jot down a quick note
  show notes             - Show your notes
  whoami                 - Remind me who you are
  help                   - Show this list again
  exit / quit / bye      - Say goodbye 😢\n",
        assistant_name
    )
}
