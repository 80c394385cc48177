//! Per-role navigation menus and page identification.

use portal_session::{Role, RouteMatch, RoutePath};

/// One entry of a dashboard menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    /// One-line summary shown on dashboard tiles.
    pub description: &'static str,
}

const fn item(
    label: &'static str,
    path: &'static str,
    icon: &'static str,
    description: &'static str,
) -> NavItem {
    NavItem {
        label,
        path,
        icon,
        description,
    }
}

const STUDENT_MENU: [NavItem; 8] = [
    item("Dashboard", "/student", "◆", "Overview of your academics"),
    item("Attendance", "/student/attendance", "✓", "View your attendance records"),
    item("Schedule", "/student/schedule", "▦", "Check your weekly timetable"),
    item("Exams & Results", "/student/exams", "↗", "See your latest exam results"),
    item("Notes", "/student/notes", "≡", "Access course materials"),
    item("Assignments", "/student/assignments", "✎", "View and submit assignments"),
    item("Fees", "/student/fees", "$", "Check your fee details"),
    item("AI Assistant", "/student/ai", "✦", "Ask questions about your courses"),
];

const TEACHER_MENU: [NavItem; 9] = [
    item("Dashboard", "/teacher", "◆", "Today's overview"),
    item("Mark Attendance", "/teacher/attendance", "✓", "Record student attendance"),
    item("My Schedule", "/teacher/schedule", "▦", "View teaching timetable"),
    item("Exam Results", "/teacher/results", "↗", "Update and manage results"),
    item("Upload Notes", "/teacher/notes", "≡", "Share course materials"),
    item("Send Notifications", "/teacher/notifications", "!", "Communicate with students"),
    item("Student Fees", "/teacher/student-fees", "$", "View fee status"),
    item("Leave Management", "/teacher/leave", "✎", "Apply and track leaves"),
    item("AI Tools", "/teacher/ai-tools", "✦", "Teaching assistance"),
];

const ADMIN_MENU: [NavItem; 9] = [
    item("Dashboard", "/admin", "◆", "University statistics at a glance"),
    item("User Management", "/admin/users", "+", "Manage students and teachers"),
    item("Send Notices", "/admin/notices", "!", "System-wide notifications"),
    item("Reports", "/admin/reports", "≡", "Generate and view reports"),
    item("Fee Management", "/admin/fees", "$", "Manage student fees"),
    item("Course Management", "/admin/courses", "▦", "Manage courses and batches"),
    item("Leave Approvals", "/admin/leave-approvals", "✓", "Review leave applications"),
    item("AI Data Tools", "/admin/ai-tools", "✦", "Analytics and insights"),
    item("Settings", "/admin/settings", "⚙", "System configuration"),
];

/// Static menu for a role. The first entry is the role's dashboard.
pub fn menu_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => &STUDENT_MENU,
        Role::Teacher => &TEACHER_MENU,
        Role::Admin => &ADMIN_MENU,
    }
}

/// What the content region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Landing,
    About,
    Login,
    Dashboard(Role),
    Attendance,
    Schedule,
    Exams,
    /// A menu entry with no page behind it
    Unavailable(RoutePath),
    NotFound(RoutePath),
}

impl Page {
    /// Page for a resolved route.
    pub fn for_route(route: &RouteMatch) -> Self {
        match route {
            RouteMatch::Public(path) => match path.as_str() {
                "/" => Page::Landing,
                "/about" => Page::About,
                "/login" => Page::Login,
                _ => Page::NotFound(path.clone()),
            },
            RouteMatch::Guarded { path, .. } => match path.as_str() {
                "/student/attendance" => Page::Attendance,
                "/student/schedule" => Page::Schedule,
                "/student/exams" => Page::Exams,
                _ => match (path.first_segment().map(str::parse::<Role>), path.segments().count()) {
                    (Some(Ok(role)), 1) => Page::Dashboard(role),
                    _ => Page::Unavailable(path.clone()),
                },
            },
            RouteMatch::NotFound(path) => Page::NotFound(path.clone()),
        }
    }

    /// Whether the page renders inside the dashboard shell.
    pub fn in_shell(&self) -> bool {
        matches!(
            self,
            Page::Dashboard(_)
                | Page::Attendance
                | Page::Schedule
                | Page::Exams
                | Page::Unavailable(_)
        )
    }

    /// Title shown in the shell header.
    pub fn title(&self) -> String {
        match self {
            Page::Landing => "University Management Portal".to_string(),
            Page::About => "About".to_string(),
            Page::Login => "Sign In".to_string(),
            Page::Dashboard(role) => format!("{} Dashboard", role.label()),
            Page::Attendance => "Attendance".to_string(),
            Page::Schedule => "Class Schedule".to_string(),
            Page::Exams => "Exams & Results".to_string(),
            Page::Unavailable(path) => label_for(path).unwrap_or("Not Available").to_string(),
            Page::NotFound(_) => "Not Found".to_string(),
        }
    }
}

/// Menu label of a path, searching every role's menu.
pub fn label_for(path: &RoutePath) -> Option<&'static str> {
    Role::ALL
        .iter()
        .flat_map(|role| menu_for(*role).iter())
        .find(|item| path == item.path)
        .map(|item| item.label)
}
