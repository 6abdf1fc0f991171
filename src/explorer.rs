//! The explorer controller: filters, search, selection and the Explore/Route tabs.
//!
//! The selected school is owned by one view at a time. Switching tabs hands
//! ownership to the tab being shown, so the clear signal a hidden view emits
//! while tearing down is ignored, while a user closing the detail panel
//! always clears.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::coord::Coordinate;
use crate::dataset::DataError;
use crate::deeplink::{MapLink, map_links};
use crate::export::{ExportError, to_csv};
use crate::filter::{FilterOptions, available_communes, filter_and_search};
use crate::geolocation::LocationError;
use crate::hierarchy::LocationHierarchy;
use crate::planner::{Command, RoutePlanner};
use crate::route::{Destination, RouteData, RouteFetchError, RouteRequest};
use crate::school::{School, SchoolId};
use crate::stats::Statistics;
use crate::traits::SchoolSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Explore,
    Route,
}

/// Why a view asks for the selection to be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCause {
    /// The user closed the detail panel or popup.
    Dismissed,
    /// A view is unmounting or being hidden.
    Teardown(Tab),
}

/// Shown instead of the map when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    /// Whether a "clear filters" action would change anything.
    pub can_clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    school_id: SchoolId,
    owner: Tab,
}

#[derive(Debug, Clone)]
pub struct ExplorerController {
    schools: Vec<School>,
    hierarchy: LocationHierarchy,
    filters: FilterOptions,
    query: String,
    selection: Option<Selection>,
    tab: Tab,
    planner: RoutePlanner,
}

impl ExplorerController {
    pub fn new(schools: Vec<School>) -> Self {
        let hierarchy = LocationHierarchy::from_schools(&schools);
        Self {
            schools,
            hierarchy,
            filters: FilterOptions::default(),
            query: String::new(),
            selection: None,
            tab: Tab::default(),
            planner: RoutePlanner::new(),
        }
    }

    pub fn from_source<S: SchoolSource + ?Sized>(source: &S) -> Result<Self, DataError> {
        Ok(Self::new(source.schools()?))
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn hierarchy(&self) -> &LocationHierarchy {
        &self.hierarchy
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub fn school(&self, id: SchoolId) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    pub fn selected_school(&self) -> Option<&School> {
        self.selection.and_then(|sel| self.school(sel.school_id))
    }

    // ---- facets & search ----

    pub fn regions(&self) -> BTreeSet<&str> {
        self.hierarchy.regions()
    }

    pub fn available_provinces(&self) -> BTreeSet<&str> {
        self.hierarchy.provinces_for_regions(self.filters.regions())
    }

    pub fn available_communes(&self) -> BTreeSet<&str> {
        available_communes(&self.filters, &self.hierarchy)
    }

    pub fn set_regions<I, S>(&mut self, regions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_regions(regions, &self.hierarchy);
    }

    pub fn set_provinces<I, S>(&mut self, provinces: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_provinces(provinces, &self.hierarchy);
    }

    pub fn set_communes<I, S>(&mut self, communes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_communes(communes, &self.hierarchy);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible_schools(&self) -> Vec<&School> {
        filter_and_search(&self.schools, &self.filters, &self.query)
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty() || !self.query.trim().is_empty()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_schools().is_empty() {
            return None;
        }
        Some(EmptyState {
            can_clear: self.has_active_filters(),
        })
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_schools(self.visible_schools())
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        to_csv(self.visible_schools())
    }

    /// Clears filters, query and selection together.
    pub fn reset(&mut self) {
        self.filters = FilterOptions::default();
        self.query.clear();
        self.selection = None;
        self.planner.set_destination(None);
        debug!("explorer reset");
    }

    // ---- selection & tabs ----

    /// Selects a school in the current tab. In the Route tab this changes the
    /// destination and may start a fetch.
    pub fn select_school(&mut self, id: SchoolId) -> Vec<Command> {
        let Some(destination) = self.destination_for(id) else {
            warn!(school = id, "selected unknown school");
            return Vec::new();
        };
        self.selection = Some(Selection {
            school_id: id,
            owner: self.tab,
        });
        self.planner.set_destination(Some(destination))
    }

    /// Clears the selection unless the request comes from a view that no
    /// longer owns it. Returns whether it was cleared.
    pub fn clear_selection(&mut self, cause: ClearCause) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if let ClearCause::Teardown(view) = cause {
            if view != selection.owner {
                debug!(?view, owner = ?selection.owner, "ignoring clear from non-owning view");
                return false;
            }
        }
        self.selection = None;
        self.planner.set_destination(None);
        true
    }

    /// Selects `id`, moves to the Route tab and starts planning, in one step.
    pub fn request_directions(&mut self, id: SchoolId) -> Vec<Command> {
        let Some(destination) = self.destination_for(id) else {
            warn!(school = id, "directions requested for unknown school");
            return Vec::new();
        };
        self.selection = Some(Selection {
            school_id: id,
            owner: Tab::Route,
        });
        self.tab = Tab::Route;
        let mut commands = self.planner.set_destination(Some(destination));
        commands.extend(self.planner.open());
        commands
    }

    pub fn switch_tab(&mut self, tab: Tab) -> Vec<Command> {
        if tab == self.tab {
            return Vec::new();
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.owner = tab;
        }
        self.tab = tab;
        match tab {
            Tab::Route => {
                let destination = self.selection.and_then(|sel| self.destination_for(sel.school_id));
                let mut commands = self.planner.set_destination(destination);
                commands.extend(self.planner.open());
                commands
            }
            Tab::Explore => {
                self.planner.close();
                Vec::new()
            }
        }
    }

    // ---- route planning ----

    pub fn location_resolved(&mut self, result: Result<Coordinate, LocationError>) -> Vec<Command> {
        self.planner.location_resolved(result)
    }

    pub fn retry_location(&mut self) -> Vec<Command> {
        self.planner.retry_location()
    }

    pub fn routes_loaded(
        &mut self,
        request: &RouteRequest,
        result: Result<Vec<RouteData>, RouteFetchError>,
    ) -> bool {
        self.planner.routes_loaded(request, result)
    }

    pub fn select_route(&mut self, index: usize) -> bool {
        self.planner.select_route(index)
    }

    /// Directions links for the selected school, from the user's position
    /// when it is known.
    pub fn map_links(&self) -> Vec<MapLink> {
        match self.selected_school() {
            Some(school) => map_links(self.planner.origin(), school.coordinate()),
            None => Vec::new(),
        }
    }

    fn destination_for(&self, id: SchoolId) -> Option<Destination> {
        self.school(id).map(|school| Destination {
            school_id: school.id,
            coordinate: school.coordinate(),
        })
    }
}
