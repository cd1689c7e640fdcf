pub const TITLE: &str = "Placement Management System";

pub const UPLOAD_TITLE: &str = "Upload Student Data";
pub const LABEL_FILE: &str = "Select Excel File";
pub const BUTTON_UPLOAD: &str = "Upload Students Data";
pub const BUTTON_UPLOAD_BUSY: &str = "Uploading...";

pub const NOTIFY_TITLE: &str = "Notify Eligible Students";
pub const LABEL_NAME: &str = "Internship Name";
pub const LABEL_THRESHOLD: &str = "Minimum CGPA";
pub const LABEL_SKILLS: &str = "Required Skills (comma-separated)";
pub const PLACEHOLDER_NAME: &str = "Software Development Internship";
pub const PLACEHOLDER_THRESHOLD: &str = "7.5";
pub const PLACEHOLDER_SKILLS: &str = "JavaScript, React, Node.js";
pub const BUTTON_NOTIFY: &str = "Notify Eligible Students";
pub const BUTTON_NOTIFY_BUSY: &str = "Sending Notifications...";

pub const MARK_SUCCESS: &str = "[OK]";
pub const MARK_ERROR: &str = "[ERROR]";

pub const HELP_TEXT: &str = "\
Commands:
  file <path>      select the spreadsheet to upload (`file` alone clears it)
  name <text>      set the internship name
  cgpa <number>    set the minimum CGPA
  skills <list>    set required skills, comma-separated
  upload           upload the selected spreadsheet
  notify           notify eligible students
  reset            leave the view: clear everything and cancel pending requests
  show             redraw the console
  help             show this list
  quit             exit";
