//! Week grid projection.
//!
//! Places filtered events on a 7-day × hour-range grid. Events sharing a
//! (day, hour) cell are stacked with a fixed vertical offset so each stays
//! clickable; there is no interval-packing beyond that. Events without a
//! start time do not go on the hourly grid and are listed per day instead.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::models::event::Event;
use crate::models::settings::GridSettings;
use crate::utils::date::week_dates;
use crate::utils::geometry::{Point, Rect};

/// One positioned event on the hourly grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock<'a> {
    pub event: &'a Event,
    pub day_index: usize,
    pub hour: u32,
    /// Position inside its (day, hour) cell, 0 for the first event
    pub stack_index: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct WeekGrid<'a> {
    pub dates: [NaiveDate; 7],
    pub hours: Range<u32>,
    /// Timed events inside the hour range, in cell then stacking order
    pub blocks: Vec<EventBlock<'a>>,
    /// Untimed events per day column
    pub all_day: [Vec<&'a Event>; 7],
    /// Timed events of this week whose hour is outside `hours`
    pub out_of_range: Vec<&'a Event>,
    settings: GridSettings,
}

impl<'a> WeekGrid<'a> {
    /// Project `events` (already filtered) onto the week containing `anchor`.
    pub fn project(events: &[&'a Event], anchor: NaiveDate, settings: &GridSettings) -> Self {
        let dates = week_dates(anchor, settings.first_day_of_week);
        let hours = settings.hours();

        let mut cells: BTreeMap<(usize, u32), Vec<&'a Event>> = BTreeMap::new();
        let mut all_day: [Vec<&'a Event>; 7] = Default::default();
        let mut out_of_range = Vec::new();

        for event in events.iter().copied() {
            let Some(day_index) = dates.iter().position(|date| *date == event.date) else {
                continue;
            };

            match event.start_hour() {
                None => all_day[day_index].push(event),
                Some(hour) if hours.contains(&hour) => {
                    cells.entry((day_index, hour)).or_default().push(event);
                }
                Some(_) => out_of_range.push(event),
            }
        }

        let blocks = cells
            .into_iter()
            .flat_map(|((day_index, hour), cell_events)| {
                cell_events
                    .into_iter()
                    .enumerate()
                    .map(move |(stack_index, event)| EventBlock {
                        event,
                        day_index,
                        hour,
                        stack_index,
                        rect: block_rect(settings, day_index, hour, stack_index),
                    })
            })
            .collect();

        Self {
            dates,
            hours,
            blocks,
            all_day,
            out_of_range,
            settings: *settings,
        }
    }

    /// Blocks of one (day, hour) cell, in stacking order
    pub fn cell(&self, day_index: usize, hour: u32) -> Vec<&EventBlock<'a>> {
        self.blocks
            .iter()
            .filter(|block| block.day_index == day_index && block.hour == hour)
            .collect()
    }

    /// The block drawn on top at `point`. Later stack entries are drawn
    /// above earlier ones.
    pub fn block_at(&self, point: Point) -> Option<&EventBlock<'a>> {
        self.blocks
            .iter()
            .filter(|block| block.rect.contains(point))
            .max_by_key(|block| block.stack_index)
    }

    /// Day column and hour row under `point`, if it lies on the grid body
    pub fn slot_at(&self, point: Point) -> Option<(NaiveDate, u32)> {
        let s = &self.settings;
        let left = s.time_label_width_px + s.column_spacing_px;
        if point.x < left || point.y < 0.0 {
            return None;
        }

        let day_index = ((point.x - left) / (s.column_width_px + s.column_spacing_px)) as usize;
        let row = (point.y / s.hour_height_px) as u32;
        let hour = self.hours.start + row;

        if day_index >= self.dates.len() || !self.hours.contains(&hour) {
            return None;
        }
        Some((self.dates[day_index], hour))
    }

    /// Total size of the grid body including the time label column
    pub fn size(&self) -> (f32, f32) {
        let s = &self.settings;
        let width = s.time_label_width_px + 7.0 * (s.column_width_px + s.column_spacing_px);
        let height = self.hours.len() as f32 * s.hour_height_px;
        (width, height)
    }

    pub fn placed_count(&self) -> usize {
        self.blocks.len()
    }
}

fn block_rect(settings: &GridSettings, day_index: usize, hour: u32, stack_index: usize) -> Rect {
    let x = settings.time_label_width_px
        + settings.column_spacing_px
        + day_index as f32 * (settings.column_width_px + settings.column_spacing_px);
    let y = (hour - settings.start_hour) as f32 * settings.hour_height_px
        + stack_index as f32 * settings.stack_offset_px;
    Rect::new(x, y, settings.column_width_px, settings.hour_height_px)
}
