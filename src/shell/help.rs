pub const HELP_TEXT: &str = "\
🚀 JOBSHELL - JOB HUNTING TERMINAL 🚀

📁 JOB COMMANDS:
  fetch <type>            Fetch jobs (internships|newgrad|fulltime)
  list                    List current jobs (aliases: ls, jobs)
  open <id>               Open job link
  search <keyword>        Search across all job fields

🔍 FILTERING:
  filter <criteria>       Filter jobs by criteria
  filter remote           Show only remote jobs
  filter location=NYC     Filter by specific location
  filter company=Google   Filter by company name

⭐ BOOKMARKS:
  bookmark <id>           Bookmark a job by ID
  bookmark remove <id>    Remove a bookmark
  bookmarks               Show all bookmarked jobs

📤 DATA EXPORT:
  export json [jobs|bookmarks]    Export to JSON format
  export csv [jobs|bookmarks]     Export to CSV format

🎨 CUSTOMIZATION:
  theme <color>           Change theme (green|blue|amber|red|purple)
  preferences             Show current preferences

💾 SESSION:
  save                    Save session data
  load                    Load session data
  status                  Show session status and stats
  history                 Show command history
  reset                   Clear loaded jobs and filters
  clear                   Clear terminal screen
  complete <partial>      Suggest completions

💡 EXAMPLES:
  > fetch internships
  > search python
  > bookmark 1
  > theme blue
  > export json bookmarks

Happy job hunting! 🎯";
