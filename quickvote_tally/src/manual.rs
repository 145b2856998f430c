/*!

This is the long-form manual for `quickvote_tally` and `qvresults`.

## From votes to bars

Live results go through the same steps every time a new vote arrives:

1. [`aggregate_votes`](crate::aggregate_votes) counts the votes per value, optionally
   for a single team. Percentages are rounded half up, each on its own: three values
   with one vote each show `33%` three times.
2. [`build_consistent_bar_data`](crate::build_consistent_bar_data) puts the counts
   in the column order of the question, so that a bar never moves while votes come in.
   Agree/disagree questions always show `Agree`, `Sometimes`, `Disagree`. Multiple
   choice questions follow their response template, or else their own options.
   Columns without votes are still present.
3. Each column gets a palette color: a fixed color per meaning for agree/disagree
   questions, a repeating list of 8 colors for multiple choice.
4. [`adaptive_chart_color`](crate::adaptive_chart_color) makes a bar lighter on dark
   backgrounds (or darker on light ones) when it does not reach the minimum
   contrast ratio, 3.0 by default.

The [builder](crate::builder::ResultsBuilder) runs all these steps.

## Input formats

`qvresults` reads a snapshot of the votes of one question.

### `json`

```text
{
  "question": {
    "type": "multiple_choice",
    "options": ["Pizza", "Sushi", "Tacos"],
    "templateOptions": null
  },
  "votes": [
    { "value": "Sushi", "team_id": "red", "participant_id": "p1" },
    { "value": "pizza", "team_id": null, "participant_id": "p2" }
  ],
  "display": { "backgroundColor": "#1f2937", "minContrast": 3.0 }
}
```

`team_id`, `options`, `templateOptions` and the whole `display` section are optional.
Other fields are ignored.

### `csv`

One vote per line, with a header row:

```text
value,team_id,participant_id
agree,red,p1
disagree,,p2
```

An empty `team_id` means no team. The question is described with the
`--question-type` and `--options` flags.

## Output

```text
{
  "question": { "teamFilter": null, "type": "agree_disagree" },
  "participants": 2,
  "totalVotes": 2,
  "results": [
    { "value": "Agree", "count": 1, "percentage": 50, "color": "#22c55e", "textColor": "light" },
    ...
  ]
}
```

With `--reference`, the output is compared to a previously saved summary and the
differences are printed.

 */
