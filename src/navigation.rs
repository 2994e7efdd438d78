//! Role-based routing: which menu entries a role sees, where it lands after
//! login, and which paths it may open.

use crate::domain::Role;

pub const OPERATIONAL_MANAGERS_ROUTE: &str = "/super-admin/operational-managers";
pub const VENDORS_ROUTE: &str = "/vendors";
pub const CATALOG_ROUTE: &str = "/admin/catalog";
pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Main,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: &'static str,
    pub section: NavSection,
}

const fn main_entry(name: &'static str, href: &'static str) -> NavEntry {
    NavEntry { name, href, section: NavSection::Main }
}

const fn footer_entry(name: &'static str, href: &'static str) -> NavEntry {
    NavEntry { name, href, section: NavSection::Footer }
}

const SUPER_ADMIN_NAV: &[NavEntry] = &[main_entry("Operational Managers", OPERATIONAL_MANAGERS_ROUTE)];

const OPERATIONAL_MANAGER_NAV: &[NavEntry] = &[main_entry("Vendors", VENDORS_ROUTE)];

const ADMIN_NAV: &[NavEntry] = &[
    main_entry("Dashboard", "/admin"),
    main_entry("Business Setup", "/admin/business-setup"),
    main_entry("Locations", "/admin/locations"),
    main_entry("Zones & Assets", "/admin/zones-assets"),
    main_entry("Staff Management", "/admin/staff"),
    main_entry("Services", "/admin/services"),
    main_entry("Bookings", "/admin/bookings"),
    main_entry("Reports & Analytics", "/admin/reports"),
    footer_entry("Settings", "/admin/settings"),
    footer_entry("Help", "/admin/help"),
];

/// Menu entries for a role, in display order. Nobody logged in sees nothing.
pub fn navigation_for(role: Option<Role>) -> &'static [NavEntry] {
    match role {
        Some(Role::SuperAdmin) => SUPER_ADMIN_NAV,
        Some(Role::OperationalManager) => OPERATIONAL_MANAGER_NAV,
        Some(Role::Admin) => ADMIN_NAV,
        None => &[],
    }
}

/// Where to send a user right after login.
pub fn landing_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::SuperAdmin) => OPERATIONAL_MANAGERS_ROUTE,
        Some(Role::OperationalManager) => VENDORS_ROUTE,
        Some(Role::Admin) | None => CATALOG_ROUTE,
    }
}

/// Whether `href` should be highlighted for the current `pathname`.
pub fn is_active(pathname: &str, href: &str) -> bool {
    pathname == href
        || pathname
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Route guard. Each dashboard area belongs to exactly one role.
pub fn can_access(role: Option<Role>, path: &str) -> bool {
    match required_role(path) {
        None => true,
        Some(required) => role == Some(required),
    }
}

fn required_role(path: &str) -> Option<Role> {
    if is_active(path, "/super-admin") {
        Some(Role::SuperAdmin)
    } else if is_active(path, VENDORS_ROUTE) {
        Some(Role::OperationalManager)
    } else if is_active(path, "/admin") {
        Some(Role::Admin)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_routes_per_role() {
        assert_eq!(landing_route(Some(Role::SuperAdmin)), "/super-admin/operational-managers");
        assert_eq!(landing_route(Some(Role::OperationalManager)), "/vendors");
        assert_eq!(landing_route(Some(Role::Admin)), "/admin/catalog");
        assert_eq!(landing_route(None), "/admin/catalog");
    }

    #[test]
    fn operational_manager_sees_only_vendors() {
        let entries = navigation_for(Some(Role::OperationalManager));
        assert_eq!(entries, &[main_entry("Vendors", "/vendors")]);
        assert_eq!(landing_route(Some(Role::OperationalManager)), entries[0].href);
    }

    #[test]
    fn admin_menu_order_and_sections() {
        let entries = navigation_for(Some(Role::Admin));
        let names: Vec<&str> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names.first(), Some(&"Dashboard"));
        assert_eq!(names.last(), Some(&"Help"));
        assert_eq!(
            entries.iter().filter(|e| e.section == NavSection::Footer).count(),
            2
        );
        assert!(entries.iter().all(|e| can_access(Some(Role::Admin), e.href)));
    }

    #[test]
    fn no_role_has_no_menu() {
        assert!(navigation_for(None).is_empty());
    }

    #[test]
    fn every_role_can_open_its_own_menu_and_landing() {
        for role in Role::ALL {
            assert!(can_access(Some(role), landing_route(Some(role))));
            for entry in navigation_for(Some(role)) {
                assert!(can_access(Some(role), entry.href), "{} -> {}", role, entry.href);
            }
        }
    }

    #[test]
    fn active_link_matching() {
        assert!(is_active("/admin/staff", "/admin/staff"));
        assert!(is_active("/admin/staff/42", "/admin/staff"));
        assert!(!is_active("/admin/staffing", "/admin/staff"));
        assert!(!is_active("/admin", "/admin/staff"));
    }

    #[test]
    fn guards_by_area() {
        assert!(can_access(None, HOME_ROUTE));
        assert!(can_access(None, LOGIN_ROUTE));
        assert!(!can_access(None, VENDORS_ROUTE));
        assert!(!can_access(Some(Role::Admin), VENDORS_ROUTE));
        assert!(!can_access(Some(Role::OperationalManager), OPERATIONAL_MANAGERS_ROUTE));
        assert!(!can_access(Some(Role::SuperAdmin), CATALOG_ROUTE));
        assert!(can_access(Some(Role::SuperAdmin), "/super-admin"));
    }
}
